// Logging Tests
//
// Tests for the logging module.

#[cfg(test)]
mod tests {
    use crate::ngtsc::logging::*;

    mod log_level_tests {
        use super::*;

        #[test]
        fn should_have_correct_ordering() {
            assert!(LogLevel::Debug < LogLevel::Info);
            assert!(LogLevel::Info < LogLevel::Warn);
            assert!(LogLevel::Warn < LogLevel::Error);
        }

        #[test]
        fn should_parse_command_line_names() {
            assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
            assert_eq!("INFO".parse::<LogLevel>(), Ok(LogLevel::Info));
            assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
            assert_eq!("error".parse::<LogLevel>(), Ok(LogLevel::Error));
            assert_eq!(
                "loud".parse::<LogLevel>(),
                Err(UnknownLogLevel("loud".to_string()))
            );
        }

        #[test]
        fn should_default_to_warn() {
            assert_eq!(LogLevel::default(), LogLevel::Warn);
            assert_eq!(LogLevel::default().to_string(), "warn");
        }
    }

    mod init_tracing_tests {
        use super::*;

        #[test]
        fn should_tolerate_repeated_initialization() {
            init_tracing(LogLevel::Error);
            init_tracing(LogLevel::Debug);
            tracing::debug!("after init");
        }
    }
}
