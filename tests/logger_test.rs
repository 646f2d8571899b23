use nebula_one::flow::init_logger;

#[test]
fn should_warn_when_logger_already_installed() {
    assert_eq!(init_logger(), None);

    let warning = init_logger().expect("a second logger must be refused");
    assert!(warning.starts_with("Warning: Could not initialize logger: "));
    assert!(warning.len() > "Warning: Could not initialize logger: ".len());
}
