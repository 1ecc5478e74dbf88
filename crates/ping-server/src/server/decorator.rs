//! Handler and decorator values, and their ordered composition.
//!
//! A [`Handler`] turns one request into one response. A [`Decorator`] turns a
//! handler into another handler, adding behaviour around it without touching
//! its logic. Chains are assembled explicitly per route with [`decorate`].

use std::{future::Future, pin::Pin, sync::Arc};

use axum::{
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderValue},
    response::Response,
};

/// Boxed future produced by a [`Handler`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Request → response function for a single route.
///
/// Cheap to clone; clones share the same underlying function.
#[derive(Clone)]
pub struct Handler(Arc<dyn Fn(Request) -> HandlerFuture + Send + Sync>);

impl Handler {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self(Arc::new(move |req| Box::pin(f(req))))
    }

    /// Run the handler on `req`.
    pub fn call(&self, req: Request) -> HandlerFuture {
        (self.0)(req)
    }
}

/// Handler → handler transformation.
pub struct Decorator(Box<dyn Fn(Handler) -> Handler + Send + Sync>);

impl Decorator {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Handler) -> Handler + Send + Sync + 'static,
    {
        Self(Box::new(f))
    }

    /// Wrap `inner` with this decorator.
    pub fn wrap(&self, inner: Handler) -> Handler {
        (self.0)(inner)
    }
}

/// Compose `decorators` around `handler`.
///
/// The first decorator becomes the outermost wrapper: `[d1, d2]` applied to
/// `h` behaves as `d1(d2(h))`. `d1` sees the request first and finishes its
/// post-processing last.
pub fn decorate<I>(handler: Handler, decorators: I) -> Handler
where
    I: IntoIterator<Item = Decorator>,
    I::IntoIter: DoubleEndedIterator,
{
    decorators
        .into_iter()
        .rev()
        .fold(handler, |inner, decorator| decorator.wrap(inner))
}

/// Defaults `Content-Type` to `application/json` for the wrapped handler.
///
/// Behaves as if the header were set before delegating: a content type chosen
/// by the wrapped handler (or a decorator nested inside this one) is kept.
pub fn add_json_header() -> Decorator {
    content_type_default(HeaderValue::from_static("application/json"))
}

fn content_type_default(value: HeaderValue) -> Decorator {
    Decorator::new(move |inner: Handler| {
        let value = value.clone();
        Handler::new(move |req| {
            let fut = inner.call(req);
            let value = value.clone();
            async move {
                let mut res = fut.await;
                res.headers_mut().entry(CONTENT_TYPE).or_insert(value);
                res
            }
        })
    })
}
