//! Request abstraction used for path-based role lookup.

/// Anything that exposes the path component of a request.
pub trait RequestPath {
    /// The request path, e.g. `/admin/users`.
    fn path(&self) -> &str;
}

impl<B> RequestPath for http::Request<B> {
    fn path(&self) -> &str {
        self.uri().path()
    }
}

impl RequestPath for http::Uri {
    fn path(&self) -> &str {
        http::Uri::path(self)
    }
}

impl RequestPath for str {
    fn path(&self) -> &str {
        self
    }
}

impl RequestPath for String {
    fn path(&self) -> &str {
        self.as_str()
    }
}
