use super::*;
use rust_decimal::Decimal;

const USER_COLUMNS: ColumnMap = ColumnMap::new(&[
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("isAdmin", "is_admin"),
]);

const STRICT_USER_COLUMNS: ColumnMap = ColumnMap::strict(&[
    ("firstName", "first_name"),
    ("lastName", "last_name"),
]);

const COMPANY_FILTERS: FilterMap = FilterMap::new(&[
    ("name", FilterExpr::Compare("LOWER(name) LIKE")),
    ("minEmployees", FilterExpr::Compare("num_employees >=")),
    ("maxEmployees", FilterExpr::Compare("num_employees <=")),
]);

const JOB_FILTERS: FilterMap = FilterMap::new(&[
    ("title", FilterExpr::Compare("LOWER(title) LIKE")),
    ("minSalary", FilterExpr::Compare("salary >=")),
    ("hasEquity", FilterExpr::Flag("equity != 0.0")),
]);

/// Every placeholder `$n` is in 1..=params.len(), strictly increasing from `$1`.
fn assert_positional(result: &ClauseResult) {
    let found = placeholders(&result.clause);
    let expected: Vec<usize> = (1..=result.params.len()).collect();
    assert_eq!(found, expected, "clause: {}", result.clause);
}

// ==================== partial update ====================

#[test]
fn partial_update_translates_and_falls_back_to_raw_key() {
    let update = Fields::new()
        .with("firstName", "HeyHey")
        .with("password", "12345");

    let result = sql_for_partial_update(&update, &USER_COLUMNS).unwrap();

    assert_eq!(result.clause, r#""first_name"=$1, "password"=$2"#);
    assert_eq!(
        result.params,
        vec![FieldValue::from("HeyHey"), FieldValue::from("12345")]
    );
    assert_positional(&result);
}

#[test]
fn partial_update_rejects_empty_payload() {
    let err = sql_for_partial_update(&Fields::new(), &USER_COLUMNS).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn partial_update_keeps_values_unchanged() {
    let update = Fields::new()
        .with("lastName", "MiXeD Case")
        .with("isAdmin", true)
        .with("age", FieldValue::Null)
        .with("equity", Decimal::new(5, 1));

    let result = sql_for_partial_update(&update, &USER_COLUMNS).unwrap();

    assert_eq!(
        result.clause,
        r#""last_name"=$1, "is_admin"=$2, "age"=$3, "equity"=$4"#
    );
    assert_eq!(
        result.params,
        vec![
            FieldValue::Text("MiXeD Case".into()),
            FieldValue::Bool(true),
            FieldValue::Null,
            FieldValue::Decimal(Decimal::new(5, 1)),
        ]
    );
    assert_positional(&result);
}

#[test]
fn partial_update_quotes_raw_keys() {
    let update = Fields::new().with(r#"x"=1; --"#, 1);
    let result = sql_for_partial_update(&update, &USER_COLUMNS).unwrap();
    assert_eq!(result.clause, r#""x""=1; --"=$1"#);
}

#[test]
fn partial_update_strict_table_rejects_unknown_field() {
    let update = Fields::new()
        .with("firstName", "a")
        .with("password", "nope");
    let err = sql_for_partial_update(&update, &STRICT_USER_COLUMNS).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("password"));
}

#[test]
fn partial_update_next_placeholder_follows_params() {
    let update = Fields::new().with("title", "New").with("salary", 700);
    let result = sql_for_partial_update(&update, &ColumnMap::new(&[])).unwrap();
    assert_eq!(result.next_placeholder(), 3);
    assert_eq!(result.param_refs().len(), 2);
}

#[test]
fn partial_update_placeholders_cover_every_key() {
    for n in 1..=12 {
        let update: Fields = (0..n).map(|i| (format!("col{i}"), i)).collect();
        let result = sql_for_partial_update(&update, &USER_COLUMNS).unwrap();
        assert_eq!(result.placeholder_count(), n as usize);
        assert_positional(&result);
    }
}

// ==================== filter ====================

#[test]
fn filter_wraps_text_and_passes_numbers() {
    let filters = Fields::new().with("name", "carol").with("minEmployees", 2);

    let result = sql_for_filter(&filters, &COMPANY_FILTERS).unwrap();

    assert_eq!(result.clause, "LOWER(name) LIKE $1 AND num_employees >= $2");
    assert_eq!(
        result.params,
        vec![FieldValue::from("%carol%"), FieldValue::Int(2)]
    );
}

#[test]
fn filter_rejects_empty_payload() {
    let err = sql_for_filter(&Fields::new(), &COMPANY_FILTERS).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn filter_lowercases_search_text() {
    let filters = Fields::new().with("name", "CaRoL Inc");
    let result = sql_for_filter(&filters, &COMPANY_FILTERS).unwrap();
    assert_eq!(result.params, vec![FieldValue::from("%carol inc%")]);
}

#[test]
fn filter_numeric_text_is_unchanged() {
    let filters = Fields::from_pairs([("title", "tit"), ("minSalary", "20000")]);

    let result = sql_for_filter(&filters, &JOB_FILTERS).unwrap();

    assert_eq!(result.clause, "LOWER(title) LIKE $1 AND salary >= $2");
    assert_eq!(
        result.params,
        vec![FieldValue::from("%tit%"), FieldValue::from("20000")]
    );
}

#[test]
fn filter_numeric_values_pass_through() {
    let values = [
        FieldValue::Int(-3),
        FieldValue::Float(1.5),
        FieldValue::Decimal(Decimal::new(25, 2)),
        FieldValue::from(" 42 "),
        FieldValue::from("1e3"),
    ];
    for value in values {
        assert!(value.is_numeric(), "{value:?}");
        let filters = Fields::new().with("minSalary", value.clone());
        let result = sql_for_filter(&filters, &JOB_FILTERS).unwrap();
        assert_eq!(result.params, vec![value]);
    }
}

#[test]
fn filter_equity_true_is_parameterless() {
    let filters = Fields::new().with("hasEquity", true);

    let result = sql_for_filter(&filters, &JOB_FILTERS).unwrap();

    assert_eq!(result.clause, "equity != 0.0");
    assert!(result.params.is_empty());
}

#[test]
fn filter_equity_false_is_dropped() {
    let filters = Fields::new()
        .with("hasEquity", false)
        .with("title", "eng");

    let result = sql_for_filter(&filters, &JOB_FILTERS).unwrap();

    assert_eq!(result.clause, "LOWER(title) LIKE $1");
    assert_eq!(result.params, vec![FieldValue::from("%eng%")]);
}

#[test]
fn filter_equity_false_alone_is_empty() {
    let filters = Fields::new().with("hasEquity", false);
    let err = sql_for_filter(&filters, &JOB_FILTERS).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn filter_equity_first_does_not_shift_placeholders() {
    let filters = Fields::new()
        .with("hasEquity", true)
        .with("title", "eng")
        .with("minSalary", 50000);

    let result = sql_for_filter(&filters, &JOB_FILTERS).unwrap();

    assert_eq!(
        result.clause,
        "equity != 0.0 AND LOWER(title) LIKE $1 AND salary >= $2"
    );
    assert_eq!(
        result.params,
        vec![FieldValue::from("%eng%"), FieldValue::Int(50000)]
    );
    assert_positional(&result);
}

#[test]
fn filter_equity_in_the_middle_keeps_order() {
    let filters = Fields::new()
        .with("title", "eng")
        .with("hasEquity", true)
        .with("minSalary", 50000);

    let result = sql_for_filter(&filters, &JOB_FILTERS).unwrap();

    assert_eq!(
        result.clause,
        "LOWER(title) LIKE $1 AND equity != 0.0 AND salary >= $2"
    );
    assert_positional(&result);
}

#[test]
fn filter_equity_accepts_query_string_text() {
    let on = Fields::from_pairs([("minSalary", "30000"), ("hasEquity", "true")]);
    let result = sql_for_filter(&on, &JOB_FILTERS).unwrap();
    assert_eq!(result.clause, "salary >= $1 AND equity != 0.0");
    assert_eq!(result.params.len(), 1);

    let off = Fields::from_pairs([("minSalary", "30000"), ("hasEquity", "false")]);
    let result = sql_for_filter(&off, &JOB_FILTERS).unwrap();
    assert_eq!(result.clause, "salary >= $1");
}

#[test]
fn filter_equity_rejects_non_boolean() {
    let filters = Fields::new().with("hasEquity", "yes please");
    let err = sql_for_filter(&filters, &JOB_FILTERS).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn filter_rejects_unknown_field() {
    let filters = Fields::new().with("title", "eng").with("ceo", "bob");
    let err = sql_for_filter(&filters, &JOB_FILTERS).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("ceo"));
}

// ==================== payloads ====================

#[test]
fn fields_from_json_keeps_object_order() {
    let body = serde_json::json!({
        "title": "New",
        "salary": 700,
        "equity": 0.9,
        "logoUrl": null,
    });
    let fields = Fields::from_json(&body).unwrap();

    assert_eq!(
        fields.keys().collect::<Vec<_>>(),
        vec!["title", "salary", "equity", "logoUrl"]
    );
    assert_eq!(fields.get("salary"), Some(&FieldValue::Int(700)));
    assert_eq!(fields.get("equity"), Some(&FieldValue::Float(0.9)));
    assert!(fields.get("logoUrl").unwrap().is_null());
}

#[test]
fn fields_from_json_rejects_nested_values() {
    let body = serde_json::json!({ "title": ["a", "b"] });
    assert!(Fields::from_json(&body).is_err());
    assert!(Fields::from_json(&serde_json::json!("title")).is_err());
}

#[test]
fn fields_set_replaces_in_place() {
    let mut fields = Fields::new();
    fields.set("a", 1).set("b", 2).set("a", 3);
    assert_eq!(fields.len(), 2);
    assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(fields.get("a"), Some(&FieldValue::Int(3)));
}

#[test]
fn value_numeric_detection() {
    assert!(!FieldValue::from("").is_numeric());
    assert!(!FieldValue::from("NaN").is_numeric());
    assert!(!FieldValue::from("inf").is_numeric());
    assert!(!FieldValue::from("12abc").is_numeric());
    assert!(!FieldValue::Bool(true).is_numeric());
    assert!(!FieldValue::Null.is_numeric());
    assert!(FieldValue::from("0.5").is_numeric());
}

#[test]
fn value_integer_view() {
    assert_eq!(FieldValue::from(" 7 ").as_i64(), Some(7));
    assert_eq!(FieldValue::Float(3.0).as_i64(), Some(3));
    assert_eq!(FieldValue::Float(3.5).as_i64(), None);
    assert_eq!(FieldValue::from(Some(4)).as_i64(), Some(4));
    assert!(FieldValue::from(None::<i32>).is_null());
}
