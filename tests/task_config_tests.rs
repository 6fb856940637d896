#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use cwlogs_input::aws::credentials::AuthenticationMethod;
    use cwlogs_input::plugin::transaction;

    #[test]
    fn test_full_task_round_trip() {
        let task = transaction(
            "log_group_name: /aws/lambda/my-function\n\
             log_stream_name: 2024/03/01\n\
             use_log_stream_name_prefix: true\n\
             start_time: '2024-03-01 00:00:00'\n\
             end_time: '2024-03-01 06:00:00'\n\
             column_name: line\n\
             authentication_method: session\n\
             aws_access_key_id: AKID\n\
             aws_secret_access_key: SECRET\n\
             aws_session_token: TOKEN\n\
             region: eu-west-1\n",
        )
        .unwrap();

        assert_eq!(task.config.log_group_name, "/aws/lambda/my-function");
        assert_eq!(task.config.log_stream_name.as_deref(), Some("2024/03/01"));
        assert!(task.config.use_log_stream_name_prefix);
        assert_eq!(task.config.column_name, "line");
        assert_eq!(task.region, "eu-west-1");
        assert_eq!(task.window.start_millis, Some(1709251200000));
        assert_eq!(task.window.end_millis, Some(1709272800000));
        assert_eq!(
            task.auth,
            AuthenticationMethod::Session {
                access_key_id: "AKID".to_string(),
                secret_access_key: "SECRET".to_string(),
                session_token: "TOKEN".to_string(),
            }
        );
    }

    #[test]
    fn test_defaults() {
        let task = transaction(
            "log_group_name: g\n\
             authentication_method: anonymous\n\
             region: us-east-1\n",
        )
        .unwrap();
        assert_eq!(task.config.column_name, "message");
        assert!(!task.config.use_log_stream_name_prefix);
        assert!(task.window.start_millis.is_none());
        assert!(task.window.end_millis.is_none());
    }

    #[test]
    fn test_default_authentication_method_is_basic() {
        let task = transaction(
            "log_group_name: g\n\
             aws_access_key_id: AKID\n\
             aws_secret_access_key: SECRET\n\
             region: us-east-1\n",
        )
        .unwrap();
        assert_eq!(
            task.auth,
            AuthenticationMethod::Basic {
                access_key_id: "AKID".to_string(),
                secret_access_key: "SECRET".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_authentication_method_mentions_the_value() {
        let err = transaction(
            "log_group_name: g\n\
             authentication_method: foo\n\
             region: us-east-1\n",
        )
        .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("'foo'"));
    }

    #[test]
    fn test_custom_time_range_format_applies_to_both_boundaries() {
        let task = transaction(
            "log_group_name: g\n\
             authentication_method: default\n\
             region: us-east-1\n\
             time_range_format: '%Y-%m-%dT%H:%M:%S'\n\
             start_time: '2024-03-01T00:00:00'\n\
             end_time: '2024-03-02T00:00:00'\n",
        )
        .unwrap();
        assert_eq!(task.window.start_millis, Some(1709251200000));
        assert_eq!(task.window.end_millis, Some(1709337600000));
    }

    #[test]
    fn test_invalid_boundary_names_the_value() {
        let err = transaction(
            "log_group_name: g\n\
             authentication_method: default\n\
             region: us-east-1\n\
             start_time: not-a-date\n",
        )
        .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("'not-a-date'"));
    }
}
