use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{SubscriptionAssessment, SubscriptionRecord, User},
    ports::{clock::ClockPort, users::UserPort},
};
use serde::Serialize;
use tower::Service;
use tracing::Instrument;

use super::{DomainLogic, Error};

pub struct SubscriptionDetailsRequest {
    pub user_id: String,
}

/// User record merged with its subscription assessment
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SubscriptionDetailsResponse {
    #[serde(flatten)]
    pub user: User,
    #[serde(flatten)]
    pub assessment: SubscriptionAssessment,
}

impl<U, B, C> Service<SubscriptionDetailsRequest> for DomainLogic<U, B, C>
where
    U: UserPort + 'static,
    C: ClockPort + 'static,
{
    type Response = SubscriptionDetailsResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: SubscriptionDetailsRequest) -> Self::Future {
        let users = self.users.clone();
        let clock = self.clock.clone();
        let policy = self.policy.clone();
        let span = tracing::info_span!("subscription_details", user_id = %req.user_id);
        Box::pin(
            async move {
                let user = users.find_by_id(&req.user_id).await?;

                // Single reading of the clock for the whole assessment
                let now = clock.now();
                let record = SubscriptionRecord::try_from(&user).map_err(|err| {
                    tracing::warn!(user_id = %user.id, %err, "invalid subscription data");
                    err
                })?;
                let assessment = policy.assess(&record, now);
                tracing::debug!(user_id = %user.id, ?assessment, "assessed subscription");

                Ok::<_, Error>(SubscriptionDetailsResponse { user, assessment })
            }
            .instrument(span),
        )
    }
}
