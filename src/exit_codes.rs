//! Exit code constants for the configmerge CLI.
//!
//! - 0: Success
//! - 1: User error (unknown format, unreadable or unwritable file)
//! - 2: Input error (malformed document, value outside the data model)
//! - 3: Merge failure (incompatible values at the same position)
//! - 4: Output error (result cannot be expressed in the target format)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: unknown file format or an I/O failure.
pub const USER_ERROR: i32 = 1;

/// A source document could not be parsed or holds unsupported data.
pub const INPUT_FAILURE: i32 = 2;

/// Two documents disagree on the kind of a value at the same position.
pub const MERGE_FAILURE: i32 = 3;

/// The merged document cannot be written in the destination format.
pub const OUTPUT_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            INPUT_FAILURE,
            MERGE_FAILURE,
            OUTPUT_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
        assert_ne!(USER_ERROR, 0);
    }
}
