/// Generate client methods with oneshot channel boilerplate and automatic tracing.
///
/// A closed mailbox or a dropped reply channel becomes
/// `UserError::ActorCommunicationError`; domain errors pass through untouched.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $crate::user_actor::UserError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $crate::user_actor::UserError::ActorCommunicationError("Actor closed".to_string()))?;

                response
                    .await
                    .map_err(|_| $crate::user_actor::UserError::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

pub(crate) use client_method;
