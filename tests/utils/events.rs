use eventbus::impl_event;

// ============================================================================
// Sample Payloads
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Foo(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct Bar(pub u32);

/// Payload routed under the explicit key "K"
#[derive(Debug, Clone, PartialEq)]
pub struct K(pub &'static str);

impl_event!(Foo, Bar, K);
