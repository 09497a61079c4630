use std::any::Any;
use std::sync::Arc;

/// Opaque reference to an externally configured HTTP client.
///
/// The state store only keeps the handle around for views to pick up; it never
/// looks inside. Clones share the same client.
#[derive(Clone)]
pub struct HttpClientHandle(Arc<dyn Any + Send + Sync>);

impl HttpClientHandle {
    pub fn new<T: Any + Send + Sync>(client: T) -> Self {
        Self(Arc::new(client))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for HttpClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HttpClientHandle(..)")
    }
}
