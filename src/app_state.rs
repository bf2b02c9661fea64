use crate::acknowledgement::AcknowledgementStore;
use crate::csrf::CsrfTokens;
use crate::workflow::SubscriptionWorkflow;

pub struct AppState {
    pub workflow: SubscriptionWorkflow,
    pub acknowledgements: AcknowledgementStore,
    pub csrf_tokens: CsrfTokens,
}
