use super::*;

#[test]
fn display_strings_are_stable() {
    assert_eq!(VpeError::BufferOverflow.to_string(), "buffer overflow");
    assert_eq!(VpeError::ParamCheckError.to_string(), "parameter check error");
    assert_eq!(
        VpeError::ScalingRatioNotSupported.to_string(),
        "scaling ratio not supported"
    );
}

#[test]
fn capability_errors_are_classified() {
    assert!(VpeError::PixelFormatNotSupported.is_capability_error());
    assert!(VpeError::ScalingRatioNotSupported.is_capability_error());
    assert!(!VpeError::InvalidBufferSize.is_capability_error());
    assert!(!VpeError::ParamCheckError.is_capability_error());
}

#[test]
fn errors_are_copy_and_comparable() {
    let a = VpeError::CmdOverflowError;
    let b = a;
    assert_eq!(a, b);
    let r: VpeResult<()> = Err(a);
    assert_eq!(r, Err(VpeError::CmdOverflowError));
}
