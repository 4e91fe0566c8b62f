//! Declarative macros for building effects
//!
//! Reducers describe backend calls as `Effect::Future` values. These macros
//! keep that description short at the call site.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use orderdesk_core::async_effect;
///
/// let api = Arc::clone(&env.orders);
/// async_effect! {
///     let orders = api.list().await;
///     Some(OrdersAction::OrdersLoaded { orders })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Future` that calls a service and maps its outcome
///
/// The service call collapses failures to `None`, so the outcome is an
/// `Option`. `on_success` receives the unwrapped value; `on_failure` builds
/// the action dispatched when the call yielded nothing.
///
/// # Example
///
/// ```rust,ignore
/// use orderdesk_core::service_call;
///
/// service_call! {
///     call: api.get(&id),
///     on_success: |order| OrdersAction::OrderLoaded { order },
///     on_failure: || OrdersAction::OrderLoadFailed { error: "not loaded".into() }
/// }
/// ```
#[macro_export]
macro_rules! service_call {
    (
        call: $call:expr,
        on_success: |$value:ident| $success_body:expr,
        on_failure: || $failure_body:expr
    ) => {
        $crate::effect::Effect::Future(::std::boxed::Box::pin(async move {
            match $call.await {
                ::std::option::Option::Some($value) => ::std::option::Option::Some($success_body),
                ::std::option::Option::None => ::std::option::Option::Some($failure_body),
            }
        }))
    };
}
