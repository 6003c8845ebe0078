use assetdesk::utils::password::{DUMMY_HASH, hash_password, verify_password};

#[test]
fn test_hash_and_verify_round_trip() {
    let hash = hash_password("correct horse battery staple").unwrap();
    assert!(verify_password("correct horse battery staple", &hash).unwrap());
}

#[test]
fn test_wrong_password_rejected() {
    let hash = hash_password("right-password").unwrap();
    assert!(!verify_password("wrong-password", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let first = hash_password("same input").unwrap();
    let second = hash_password("same input").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_dummy_hash_is_a_valid_bcrypt_hash() {
    // must parse and verify without error; no real password should match it
    assert!(!verify_password("admin123", DUMMY_HASH).unwrap());
    assert!(!verify_password("", DUMMY_HASH).unwrap());
}
