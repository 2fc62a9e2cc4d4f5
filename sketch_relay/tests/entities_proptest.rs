/// Property-based tests for image payloads and identity input
///
/// Drawings travel as base64 data URLs, so any file content has to come
/// back byte for byte. Identity input is trimmed and bounded, never cut.
use proptest::prelude::*;
use sketch_relay::{
    IdentityError, ImageData, Username, constants::MAX_USER_INPUT_LENGTH,
};

fn mime_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "image/png",
        "image/jpeg",
        "image/gif",
        "image/webp",
        "image/svg+xml",
    ])
}

proptest! {
    #[test]
    fn test_image_bytes_round_trip(
        mime in mime_strategy(),
        bytes in prop::collection::vec(any::<u8>(), 0..4096),
    ) {
        let image = ImageData::encode(mime, &bytes);
        prop_assert_eq!(image.mime_type(), mime);
        prop_assert_eq!(image.decode().unwrap(), bytes);
    }

    #[test]
    fn test_image_data_url_reparses(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let image = ImageData::encode("image/png", &bytes);
        let reparsed = ImageData::from_data_url(image.as_data_url()).unwrap();
        prop_assert_eq!(reparsed.mime_type(), "image/png");
        prop_assert_eq!(reparsed.decode().unwrap(), bytes);
    }

    #[test]
    fn test_username_kept_whole_or_refused(name in "[a-zA-Z0-9 ]{1,100}") {
        let trimmed = name.trim();
        match Username::new(&name) {
            Ok(username) => {
                prop_assert_eq!(username.as_str(), trimmed);
                prop_assert!(trimmed.chars().count() <= MAX_USER_INPUT_LENGTH);
            }
            Err(IdentityError::EmptyUsername) => prop_assert!(trimmed.is_empty()),
            Err(IdentityError::TooLong { .. }) => {
                prop_assert!(trimmed.chars().count() > MAX_USER_INPUT_LENGTH);
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }
}
