use std::sync::Arc;
use crate::gateway::payment::PaymentGateway;
use crate::gateway::simulated::SimulatedPaymentGateway;

pub fn create_payment_gateway() -> Arc<dyn PaymentGateway> {
    Arc::new(SimulatedPaymentGateway::new())
}
