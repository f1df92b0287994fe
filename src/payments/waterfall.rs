use crate::decimal::Money;
use crate::types::PaymentApplication;

/// balances a payment can be applied against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutstandingBalances {
    pub accrued_interest: Money,
    pub accrued_late: Money,
    pub principal: Money,
}

impl OutstandingBalances {
    pub fn fees(&self) -> Money {
        self.accrued_interest + self.accrued_late
    }
}

#[derive(Debug, Clone, Copy)]
enum PaymentComponent {
    Interest,
    Late,
    Principal,
}

/// strict allocation order: interest, then late penalty, then principal
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentWaterfall;

impl PaymentWaterfall {
    const ORDER: [PaymentComponent; 3] = [
        PaymentComponent::Interest,
        PaymentComponent::Late,
        PaymentComponent::Principal,
    ];

    pub fn new() -> Self {
        Self
    }

    /// apply `amount` in order; whatever is left over is reported as excess
    pub fn apply(&self, amount: Money, balances: &mut OutstandingBalances) -> PaymentApplication {
        let mut remaining = amount;
        let mut application = PaymentApplication::default();

        for component in Self::ORDER {
            if !remaining.is_positive() {
                break;
            }
            remaining = Self::apply_to_component(component, remaining, balances, &mut application);
        }

        application.excess = remaining.non_negative();
        application
    }

    fn apply_to_component(
        component: PaymentComponent,
        available: Money,
        balances: &mut OutstandingBalances,
        application: &mut PaymentApplication,
    ) -> Money {
        let (balance, applied_field) = match component {
            PaymentComponent::Interest => (&mut balances.accrued_interest, &mut application.to_interest),
            PaymentComponent::Late => (&mut balances.accrued_late, &mut application.to_late),
            PaymentComponent::Principal => (&mut balances.principal, &mut application.to_principal),
        };

        let payment = available.min(balance.non_negative());
        *balance -= payment;
        *applied_field += payment;

        available - payment
    }
}
