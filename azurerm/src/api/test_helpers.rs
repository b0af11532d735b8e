//! Test helpers for the API layer

pub fn create_test_client(url: &str) -> super::Client {
    super::Client::new(url, "test-token").unwrap()
}

mod tests {
    use super::super::*;
    use serial_test::serial;

    #[test]
    fn client_rejects_invalid_endpoints() {
        assert!(matches!(
            Client::new("not a url", "token"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    #[serial]
    fn client_from_env_requires_endpoint_and_token() {
        std::env::remove_var("ARM_ENDPOINT");
        std::env::remove_var("ARM_ACCESS_TOKEN");
        assert!(matches!(
            Client::from_env(),
            Err(ApiError::InvalidUrl(_))
        ));

        std::env::set_var("ARM_ENDPOINT", "https://management.local");
        assert!(matches!(Client::from_env(), Err(ApiError::Auth)));

        std::env::set_var("ARM_ACCESS_TOKEN", "secret");
        assert!(Client::from_env().is_ok());

        std::env::remove_var("ARM_ENDPOINT");
        std::env::remove_var("ARM_ACCESS_TOKEN");
    }

    #[test]
    fn not_found_is_distinguished() {
        assert!(ApiError::NotFound.is_not_found());
        assert!(!ApiError::Auth.is_not_found());
        assert!(!ApiError::Api {
            status: 500,
            message: "boom".to_string()
        }
        .is_not_found());
    }
}
