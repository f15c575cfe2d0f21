use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};

use crate::domain::Charset;

/// Bytes left as-is in query values: ASCII alphanumerics plus `-_.~/`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Percent-encode `value` after converting it to `charset`.
pub fn quote(value: &str, charset: Charset) -> String {
    percent_encode(&charset.encode(value), QUERY_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use percent_encoding::percent_decode_str;

    use super::*;

    #[test]
    fn keeps_unreserved_and_slash() {
        assert_eq!(quote("a-b_c.d~e/f", Charset::Utf8), "a-b_c.d~e/f");
        assert_eq!(quote("a b&c=d+e", Charset::Utf8), "a%20b%26c%3Dd%2Be");
        assert_eq!(quote("+7,8", Charset::Utf8), "%2B7%2C8");
    }

    #[test]
    fn encodes_in_selected_charset() {
        assert_eq!(quote("Привет", Charset::Utf8), "%D0%9F%D1%80%D0%B8%D0%B2%D0%B5%D1%82");
        assert_eq!(quote("Привет", Charset::Windows1251), "%CF%F0%E8%E2%E5%F2");
    }

    #[test]
    fn phone_list_round_trips() {
        let phones = ["+79251234567", "79990000000", "8 (925) 123-45-67"];
        let encoded = quote(&phones.join(","), Charset::Utf8);
        let decoded = percent_decode_str(&encoded).decode_utf8().unwrap();
        let split = decoded.split(',').collect::<Vec<_>>();
        assert_eq!(split, phones);
    }
}
