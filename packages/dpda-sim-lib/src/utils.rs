use std::fmt::{Debug, Display};

/// Renders an optional symbol for diagnostics, using `ε` for the absence.
pub fn debug_or_epsilon<T: Debug>(symbol: &Option<T>) -> String {
    match symbol {
        Some(symbol) => format!("{:?}", symbol),
        None => "ε".to_string(),
    }
}

/// Renders an optional symbol for display output, using `ε` for the absence.
pub fn display_or_epsilon<T: Display>(symbol: &Option<T>) -> String {
    match symbol {
        Some(symbol) => symbol.to_string(),
        None => "ε".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon_rendering() {
        assert_eq!(debug_or_epsilon(&Some("Z")), "\"Z\"");
        assert_eq!(debug_or_epsilon::<char>(&None), "ε");
        assert_eq!(display_or_epsilon(&Some('Z')), "Z");
        assert_eq!(display_or_epsilon::<char>(&None), "ε");
    }
}
