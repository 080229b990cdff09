use actix::prelude::*;
use async_trait::async_trait;
use tracing::Span;

/// Message with span used for trace logging
pub struct SpanMessage<I> {
    pub msg: I,
    pub span: Span,
}

impl<M> SpanMessage<M> {
    pub fn new(msg: M) -> Self {
        Self {
            msg,
            span: Span::current(),
        }
    }
}

impl<M, R: 'static> Message for SpanMessage<M>
where
    M: Message<Result = R>,
{
    type Result = R;
}

/// Handler for messages whose work happens outside the actor.
///
/// `state` is called synchronously on the actor to hand out whatever the
/// future needs (a pool handle, a client, ...). The returned future is then
/// polled inside the span the message was sent from.
#[async_trait]
pub trait AsyncSpanHandler<M>
where
    Self: Actor,
    M: Message + Send + 'static,
{
    type State: Send + 'static;

    fn state(&mut self) -> Self::State;

    async fn handle(state: Self::State, msg: M) -> <M as Message>::Result;
}

#[macro_export]
macro_rules! span_message_async_impl {
    ($message_type:ident, $actor:ident) => {
        impl actix::Handler<$crate::span::SpanMessage<$message_type>> for $actor {
            type Result = actix::ResponseFuture<<$message_type as actix::Message>::Result>;

            fn handle(
                &mut self,
                msg: $crate::span::SpanMessage<$message_type>,
                _ctx: &mut Self::Context,
            ) -> Self::Result {
                use tracing::Instrument;
                let $crate::span::SpanMessage { span, msg } = msg;
                let state =
                    <Self as $crate::span::AsyncSpanHandler<$message_type>>::state(self);
                Box::pin(
                    <Self as $crate::span::AsyncSpanHandler<$message_type>>::handle(state, msg)
                        .instrument(span),
                )
            }
        }
    };
}

#[macro_export]
macro_rules ! async_message_handler_with_span {
    (impl AsyncSpanHandler<$M:ident> for $A:ident $t:tt) => {
        $crate::span_message_async_impl!($M, $A);
        #[async_trait::async_trait]
        impl $crate::span::AsyncSpanHandler<$M> for $A
            $t

    }
}
