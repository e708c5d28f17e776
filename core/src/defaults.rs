//! Per-method content-type tables.
//!
//! Both tables are compile-time constants indexed by [`HttpMethod`]; callers
//! borrow them, nothing copies or mutates them.

use crate::http::HttpMethod;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A fixed mapping from each method to an optional content-type.
#[derive(Debug)]
pub struct MethodTable([Option<&'static str>; 9]);

impl MethodTable {
    pub const fn get(&self, method: HttpMethod) -> Option<&'static str> {
        self.0[method.index()]
    }
}

/// `Content-Type` sent by default. Only the body-carrying verbs get one.
pub const METHOD_DEFAULTS: MethodTable = MethodTable([
    None,                    // GET
    Some(JSON_CONTENT_TYPE), // POST
    Some(JSON_CONTENT_TYPE), // PUT
    Some(JSON_CONTENT_TYPE), // PATCH
    None,                    // DELETE
    None,                    // HEAD
    None,                    // OPTIONS
    None,                    // CONNECT
    None,                    // TRACE
]);

/// Content-type a response must contain unless the client overrides it.
pub const EXPECTED_RESPONSE_TYPES: MethodTable = MethodTable([
    Some(JSON_CONTENT_TYPE), // GET
    Some(JSON_CONTENT_TYPE), // POST
    Some(JSON_CONTENT_TYPE), // PUT
    Some(JSON_CONTENT_TYPE), // PATCH
    None,                    // DELETE
    None,                    // HEAD
    None,                    // OPTIONS
    None,                    // CONNECT
    None,                    // TRACE
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_body_verbs_default_to_json() {
        for method in HttpMethod::ALL {
            let expected = matches!(method, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch);
            assert_eq!(
                METHOD_DEFAULTS.get(method) == Some(JSON_CONTENT_TYPE),
                expected,
                "{method}"
            );
        }
    }

    #[test]
    fn get_expects_json_but_sends_nothing() {
        assert_eq!(METHOD_DEFAULTS.get(HttpMethod::Get), None);
        assert_eq!(EXPECTED_RESPONSE_TYPES.get(HttpMethod::Get), Some(JSON_CONTENT_TYPE));
        assert_eq!(EXPECTED_RESPONSE_TYPES.get(HttpMethod::Delete), None);
        assert_eq!(EXPECTED_RESPONSE_TYPES.get(HttpMethod::Head), None);
    }
}
