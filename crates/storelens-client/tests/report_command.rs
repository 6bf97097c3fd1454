mod support;

use serde_json::Value;
use storelens_client::commands::report::{self, ReportKind, ReportRunOptions};
use support::orders_testkit::{approx, fixture_dir, payload, write_fixture};

const ORDERS_EXPORT: &str = "\
customer_id,customer_unique_id,customer_city,customer_state,order_id,order_status,order_purchase_timestamp,product_id,price,quantity,product_category_name_english,review_score
k1,u1,sao paulo,SP,o1,delivered,2017-11-24 10:00:00,p1,10,1,bed_bath_table,5
k1,u1,sao paulo,SP,o1,delivered,2017-11-24 10:00:00,p2,12,1,bed_bath_table,4
k2,u2,sao paulo,SP,o2,delivered,2017-11-25 11:00:00,p3,30,1,health_beauty,3
k3,u3,rio de janeiro,RJ,o3,shipped,2018-01-05 09:00:00,p4,8,2,toys,
k4,u4,campinas,SP,o4,canceled,2018-01-06 09:00:00,p5,15,1,,2
k5,u5,,,o5,delivered,2018-02-01 09:00:00,p6,20,1,bed_bath_table,1
";

const PAYMENTS_EXPORT: &str = "\
order_id,payment_sequential,payment_type,payment_installments,payment_value
o1,1,credit_card,3,22.00
o2,1,credit_card,1,30.00
o3,1,boleto,1,16.00
o4,1,voucher,1,5.00
o4,2,voucher,1,10.00
";

const GEOLOCATION_EXPORT: &str = "\
geolocation_zip_code_prefix,geolocation_lat,geolocation_lng,geolocation_city,geolocation_state
01037,-23.54,-46.63,sao paulo,SP
01046,-23.54,-46.64,sao paulo,SP
13023,-22.89,-47.06,campinas,SP
20010,-22.90,-43.17,rio de janeiro,RJ
";

fn run_report(kind: ReportKind, body: &str, limit: Option<usize>, state: Option<&str>) -> Value {
    payload(report::run_with_options(ReportRunOptions {
        kind,
        path: "-".to_string(),
        limit,
        state: state.map(std::string::ToString::to_string),
        stdin_override: Some(body.to_string()),
    }))
}

fn labels(rows: &Value) -> Vec<(String, u64)> {
    rows.as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .map(|row| {
            (
                row["label"].as_str().unwrap_or_default().to_string(),
                row["count"].as_u64().unwrap_or_default(),
            )
        })
        .collect()
}

fn pairs(values: &[(&str, u64)]) -> Vec<(String, u64)> {
    values
        .iter()
        .map(|(label, count)| ((*label).to_string(), *count))
        .collect()
}

#[test]
fn cities_count_unique_customers_and_skip_blank_cities() {
    let value = run_report(ReportKind::Cities, ORDERS_EXPORT, None, None);
    assert_eq!(value["command"], "report cities");
    let data = &value["data"];
    assert_eq!(data["title"], "Customers by City");
    assert_eq!(data["limit"], 10);
    assert_eq!(data["skipped_rows"], 1);
    assert_eq!(
        labels(&data["result"]["rows"]),
        pairs(&[("sao paulo", 2), ("campinas", 1), ("rio de janeiro", 1)])
    );

    let limited = run_report(ReportKind::Cities, ORDERS_EXPORT, Some(1), None);
    assert_eq!(
        labels(&limited["data"]["result"]["rows"]),
        pairs(&[("sao paulo", 2)])
    );
}

#[test]
fn states_status_and_monthly_are_plain_counts() {
    let states = run_report(ReportKind::States, ORDERS_EXPORT, None, None);
    assert_eq!(
        labels(&states["data"]["result"]["rows"]),
        pairs(&[("SP", 3), ("RJ", 1)])
    );
    assert!(states["data"].get("limit").is_none());

    let status = run_report(ReportKind::Status, ORDERS_EXPORT, None, None);
    assert_eq!(
        labels(&status["data"]["result"]["rows"]),
        pairs(&[("delivered", 4), ("canceled", 1), ("shipped", 1)])
    );

    let monthly = run_report(ReportKind::Monthly, ORDERS_EXPORT, None, None);
    assert_eq!(
        labels(&monthly["data"]["result"]["rows"]),
        pairs(&[("2017-11", 2), ("2018-01", 2), ("2018-02", 1)])
    );
}

#[test]
fn reviews_average_per_category_best_first() {
    let value = run_report(ReportKind::Reviews, ORDERS_EXPORT, None, None);
    let data = &value["data"];
    assert_eq!(data["skipped_rows"], 2);
    let rows = data["result"]["rows"].as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["category"], "bed_bath_table");
    assert_eq!(rows[0]["reviews"], 3);
    assert!(approx(rows[0]["average_score"].as_f64().unwrap_or_default(), 3.3333));
    assert_eq!(rows[1]["category"], "health_beauty");
    assert!(approx(rows[1]["average_score"].as_f64().unwrap_or_default(), 3.0));
}

#[test]
fn categories_list_best_and_worst_sellers() {
    let value = run_report(ReportKind::Categories, ORDERS_EXPORT, Some(1), None);
    let result = &value["data"]["result"];
    assert_eq!(value["data"]["skipped_rows"], 1);
    assert_eq!(
        labels(&result["most_sold"]),
        pairs(&[("bed_bath_table", 3)])
    );
    assert_eq!(labels(&result["least_sold"]), pairs(&[("toys", 1)]));
}

#[test]
fn payments_average_value_per_type() {
    let value = run_report(ReportKind::Payments, PAYMENTS_EXPORT, None, None);
    let rows = value["data"]["result"]["rows"].as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["payment_type"], "credit_card");
    assert_eq!(rows[0]["transactions"], 2);
    assert!(approx(rows[0]["average_value"].as_f64().unwrap_or_default(), 26.0));
    assert_eq!(rows[1]["payment_type"], "voucher");
    assert!(approx(rows[1]["average_value"].as_f64().unwrap_or_default(), 7.5));
    assert_eq!(rows[2]["payment_type"], "boleto");
}

#[test]
fn zip_codes_group_by_city_within_one_state() {
    let dir = fixture_dir("storelens-geo");
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let path = write_fixture(dir.path(), "geolocation.csv", GEOLOCATION_EXPORT);
        let value = payload(report::run(
            ReportKind::ZipCodes,
            &path.display().to_string(),
            None,
            Some("sp"),
        ));
        assert_eq!(value["command"], "report zip-codes");
        assert_eq!(value["data"]["state"], "SP");
        assert_eq!(
            labels(&value["data"]["result"]["rows"]),
            pairs(&[("sao paulo", 2), ("campinas", 1)])
        );

        let unknown = payload(report::run(
            ReportKind::ZipCodes,
            &path.display().to_string(),
            None,
            Some("AC"),
        ));
        assert_eq!(labels(&unknown["data"]["result"]["rows"]), Vec::new());
    }
}

#[test]
fn reports_reject_flags_they_do_not_take() {
    let states = report::run_with_options(ReportRunOptions {
        kind: ReportKind::States,
        path: "-".to_string(),
        limit: Some(3),
        state: None,
        stdin_override: Some(ORDERS_EXPORT.to_string()),
    });
    assert!(states.is_err());
    if let Err(error) = states {
        assert_eq!(error.code, "invalid_argument");
        assert_eq!(error.recovery_steps, vec!["Run `storelens report states --help` for usage.".to_string()]);
    }

    let zip_codes = report::run(ReportKind::ZipCodes, "-", None, None);
    assert!(zip_codes.is_err());
    if let Err(error) = zip_codes {
        assert_eq!(error.code, "invalid_argument");
    }
}

#[test]
fn order_reports_accept_exports_without_amount_columns() {
    let export = "\
customer_unique_id,customer_state,order_id,order_status,order_purchase_timestamp,price
u1,SP,o1,delivered,2017-11-24 10:00:00,10
u2,RJ,o2,shipped,2017-12-01 09:00:00,
u3,SP,o3,delivered,2017-12-02 09:00:00,4.5
";
    let states = run_report(ReportKind::States, export, None, None);
    assert_eq!(
        labels(&states["data"]["result"]["rows"]),
        pairs(&[("SP", 2), ("RJ", 1)])
    );

    let monthly = run_report(ReportKind::Monthly, export, None, None);
    assert_eq!(
        labels(&monthly["data"]["result"]["rows"]),
        pairs(&[("2017-12", 2), ("2017-11", 1)])
    );

    let bad_amount = report::run_with_options(ReportRunOptions {
        kind: ReportKind::Status,
        path: "-".to_string(),
        limit: None,
        state: None,
        stdin_override: Some(export.replace(",4.5", ",-4.5")),
    });
    assert!(bad_amount.is_err());
    if let Err(error) = bad_amount {
        assert_eq!(error.code, "invalid_value");
    }
}

#[test]
fn payments_report_needs_payment_headers() {
    let result = report::run_with_options(ReportRunOptions {
        kind: ReportKind::Payments,
        path: "-".to_string(),
        limit: None,
        state: None,
        stdin_override: Some(ORDERS_EXPORT.to_string()),
    });
    assert!(result.is_err());
    if let Err(error) = result {
        assert_eq!(error.code, "missing_field");
        assert!(error.message.contains("payment_type"));
    }
}
