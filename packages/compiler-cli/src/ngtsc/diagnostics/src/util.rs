use super::error_code::ErrorCode;

/// Angular error codes are reported as negative numbers prefixed with `-99`,
/// keeping them apart from TypeScript's own positive diagnostic codes.
pub fn ng_error_code(code: ErrorCode) -> i32 {
    -(990_000 + code.code() as i32)
}

/// The printable form of a diagnostic code: `NG2008` for Angular codes and
/// `TS2339` for TypeScript ones.
pub fn format_error_code(code: i32) -> String {
    if code <= -990_000 {
        format!("NG{}", -code - 990_000)
    } else {
        format!("TS{}", code)
    }
}
