//! Transaction record builder
//!
//! This module provides a builder pattern for constructing delivery transaction
//! records. Callers set one field at a time and `build()` validates the result,
//! so a half-entered form never turns into a record with missing or negative
//! amounts.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{PaymentStatus, TransactionRecord, generate_transaction_id};

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {0} must be non-negative, got {1}")]
    NegativeAmount(&'static str, f64),
}

/// Builder for constructing `TransactionRecord` values field by field
#[derive(Debug, Default, Clone)]
pub struct TransactionRecordBuilder {
    transaction_id: Option<String>,
    date: Option<DateTime<Utc>>,
    vehicle_no: Option<String>,
    customer_name: Option<String>,
    shipping_address: Option<String>,
    material: Option<String>,
    quantity: Option<f64>,
    payment_status: Option<PaymentStatus>,
    payment_received: Option<f64>,
    total_amount: Option<f64>,
    driver_name: Option<String>,
    notes: Option<String>,
}

impl TransactionRecordBuilder {
    /// Creates a new, empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit transaction id; a fresh one is generated otherwise
    pub fn with_transaction_id(mut self, id: impl Into<String>) -> Self {
        self.transaction_id = Some(id.into());
        self
    }

    /// Sets the delivery date; defaults to now
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_vehicle_no(mut self, vehicle_no: impl Into<String>) -> Self {
        self.vehicle_no = Some(vehicle_no.into());
        self
    }

    pub fn with_customer_name(mut self, customer_name: impl Into<String>) -> Self {
        self.customer_name = Some(customer_name.into());
        self
    }

    pub fn with_shipping_address(mut self, shipping_address: impl Into<String>) -> Self {
        self.shipping_address = Some(shipping_address.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Sets the payment status; defaults to `Unpaid`
    pub fn with_payment_status(mut self, status: PaymentStatus) -> Self {
        self.payment_status = Some(status);
        self
    }

    /// Sets the amount received so far; defaults to 0
    pub fn with_payment_received(mut self, amount: f64) -> Self {
        self.payment_received = Some(amount);
        self
    }

    pub fn with_total_amount(mut self, amount: f64) -> Self {
        self.total_amount = Some(amount);
        self
    }

    pub fn with_driver_name(mut self, driver_name: impl Into<String>) -> Self {
        self.driver_name = Some(driver_name.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builds the final record.
    ///
    /// Requires vehicle number, customer name, shipping address, quantity,
    /// total amount and driver name; the numeric fields must be non-negative.
    /// `payment_received` exceeding `total_amount` is not rejected here.
    pub fn build(self) -> Result<TransactionRecord, RecordError> {
        let vehicle_no = self
            .vehicle_no
            .filter(|v| !v.is_empty())
            .ok_or(RecordError::MissingField("vehicleNo"))?;
        let customer_name = self
            .customer_name
            .filter(|v| !v.is_empty())
            .ok_or(RecordError::MissingField("customerName"))?;
        let shipping_address = self
            .shipping_address
            .filter(|v| !v.is_empty())
            .ok_or(RecordError::MissingField("shippingAddress"))?;
        let quantity = self.quantity.ok_or(RecordError::MissingField("quantity"))?;
        let total_amount = self
            .total_amount
            .ok_or(RecordError::MissingField("totalAmount"))?;
        let driver_name = self
            .driver_name
            .filter(|v| !v.is_empty())
            .ok_or(RecordError::MissingField("driverName"))?;
        let payment_received = self.payment_received.unwrap_or(0.0);

        for (name, value) in [
            ("quantity", quantity),
            ("totalAmount", total_amount),
            ("paymentReceived", payment_received),
        ] {
            if value < 0.0 {
                return Err(RecordError::NegativeAmount(name, value));
            }
        }

        Ok(TransactionRecord {
            transaction_id: self.transaction_id.unwrap_or_else(generate_transaction_id),
            date: self.date.unwrap_or_else(Utc::now),
            vehicle_no,
            customer_name,
            shipping_address,
            material: self.material.unwrap_or_default(),
            quantity,
            payment_status: self.payment_status.unwrap_or_default(),
            payment_received,
            total_amount,
            driver_name,
            notes: self.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_builder() -> TransactionRecordBuilder {
        TransactionRecordBuilder::new()
            .with_vehicle_no("BA-1-2345")
            .with_customer_name("Ram Traders")
            .with_shipping_address("Kathmandu")
            .with_material("Sand")
            .with_quantity(10.0)
            .with_total_amount(15000.0)
            .with_driver_name("Hari")
    }

    #[test]
    fn builds_record_with_defaults() {
        let record = filled_builder().build().expect("Failed to build record");
        assert!(record.transaction_id.starts_with("TXN"));
        assert_eq!(record.payment_status, PaymentStatus::Unpaid);
        assert_eq!(record.payment_received, 0.0);
        assert_eq!(record.notes, None);
    }

    #[test]
    fn rejects_missing_required_field() {
        let result = TransactionRecordBuilder::new()
            .with_vehicle_no("BA-1-2345")
            .with_quantity(10.0)
            .build();
        assert!(matches!(result, Err(RecordError::MissingField("customerName"))));
    }

    #[test]
    fn rejects_blank_required_field() {
        let result = filled_builder().with_driver_name("").build();
        assert!(matches!(result, Err(RecordError::MissingField("driverName"))));
    }

    #[test]
    fn rejects_negative_amounts() {
        let result = filled_builder().with_payment_received(-5.0).build();
        assert!(matches!(
            result,
            Err(RecordError::NegativeAmount("paymentReceived", _))
        ));
    }

    #[test]
    fn keeps_explicit_id_and_status() {
        let record = filled_builder()
            .with_transaction_id("TXN000001")
            .with_payment_status(PaymentStatus::PartiallyPaid)
            .with_payment_received(5000.0)
            .build()
            .unwrap();
        assert_eq!(record.transaction_id, "TXN000001");
        assert_eq!(record.payment_status, PaymentStatus::PartiallyPaid);
        assert_eq!(record.payment_received, 5000.0);
    }
}
