#[test]
fn test_split_virtual_project() {
    assert_eq!(split_virtual("app-virtual-lite"), ("app", "-virtual-lite"));
    assert_eq!(split_virtual("app"), ("app", ""));
}

#[test]
fn test_variable_tokens() {
    assert!(is_variable_token(KERNEL_SENTINEL));
    assert!(!is_variable_token("libfoo"));
}
