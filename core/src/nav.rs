//! The four steps of a session and the page theme.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Value of the `data-theme` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Label for the button that switches away from this theme.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "Switch to Light",
            Theme::Light => "Switch to Dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Landing,
    Quiz,
    Profile,
    Results,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Landing, Step::Quiz, Step::Profile, Step::Results];

    pub fn path(self) -> &'static str {
        match self {
            Step::Landing => "/",
            Step::Quiz => "/quiz",
            Step::Profile => "/profile",
            Step::Results => "/results",
        }
    }

    pub fn number(self) -> usize {
        match self {
            Step::Landing => 1,
            Step::Quiz => 2,
            Step::Profile => 3,
            Step::Results => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Landing => "Landing",
            Step::Quiz => "Quiz",
            Step::Profile => "Profile",
            Step::Results => "Results",
        }
    }

    pub fn nav_label(self) -> String {
        format!("Step {} - {}", self.number(), self.title())
    }

    /// Whether a nav link for this step is active at `pathname`.
    pub fn is_active(self, pathname: &str) -> bool {
        let path = self.path();
        pathname == path || (self != Step::Landing && pathname.starts_with(&format!("{}/", path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggle_label(), "Switch to Light");
    }

    #[test]
    fn test_step_sequence() {
        let numbers: Vec<usize> = Step::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(Step::Results.path(), "/results");
        assert_eq!(Step::Profile.nav_label(), "Step 3 - Profile");
    }

    #[test]
    fn test_active_link_matching() {
        assert!(Step::Landing.is_active("/"));
        assert!(!Step::Landing.is_active("/quiz"));
        assert!(Step::Quiz.is_active("/quiz"));
        assert!(Step::Quiz.is_active("/quiz/2"));
        assert!(!Step::Quiz.is_active("/quizzes"));
    }
}
