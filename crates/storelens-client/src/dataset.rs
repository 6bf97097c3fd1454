use chrono::NaiveDateTime;

/// One order line of the e-commerce export.
///
/// The first five fields are what the RFM engine consumes. The optional
/// attributes only feed the descriptive reports and may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub customer_unique_id: String,
    pub order_id: String,
    pub order_purchase_timestamp: NaiveDateTime,
    pub price: f64,
    pub quantity: f64,
    pub customer_id: Option<String>,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
    pub order_status: Option<String>,
    pub product_id: Option<String>,
    pub product_category: Option<String>,
    pub review_score: Option<f64>,
}

impl OrderLine {
    pub fn new(
        customer_unique_id: &str,
        order_id: &str,
        order_purchase_timestamp: NaiveDateTime,
        price: f64,
        quantity: f64,
    ) -> Self {
        Self {
            customer_unique_id: customer_unique_id.to_string(),
            order_id: order_id.to_string(),
            order_purchase_timestamp,
            price,
            quantity,
            customer_id: None,
            customer_city: None,
            customer_state: None,
            order_status: None,
            product_id: None,
            product_category: None,
            review_score: None,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * self.quantity
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub order_id: String,
    pub payment_type: String,
    pub payment_value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeolocationRecord {
    pub zip_code_prefix: String,
    pub city: String,
    pub state: String,
}
