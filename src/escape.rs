use std::borrow::Cow;

/// Quote a value as a PowerShell single-quoted literal when it needs it.
///
/// Values containing a space or a single quote are wrapped in single quotes and
/// every embedded quote is doubled. Anything else is returned as-is.
pub fn escape_argument(value: &str) -> Cow<'_, str> {
    if value.contains(' ') || value.contains('\'') {
        Cow::Owned(format!("'{}'", value.replace('\'', "''")))
    } else {
        Cow::Borrowed(value)
    }
}
