/// Braille dot spinner frames
const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Spinner animation phase. Advanced by the spinner timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spinner {
    phase: usize,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        self.phase = (self.phase + 1) % FRAMES.len();
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn frame(&self) -> &'static str {
        FRAMES[self.phase]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps_around() {
        let mut spinner = Spinner::new();
        assert_eq!(spinner.frame(), "⣾");

        for _ in 0..FRAMES.len() {
            spinner.advance();
        }
        assert_eq!(spinner.phase(), 0);

        spinner.advance();
        assert_eq!(spinner.frame(), "⣽");
    }
}
