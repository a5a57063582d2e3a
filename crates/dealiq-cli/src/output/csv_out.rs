use serde_json::Value;
use std::io;

/// Write output as CSV to stdout. Objects become field/value rows;
/// arrays of objects (sweep points, rehab lines) become header + rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match body {
        Value::Object(map) => {
            // Sweep reports carry their rows under "sweeps".
            if let Some(Value::Array(sweeps)) = map.get("sweeps") {
                write_sweeps(&mut wtr, sweeps);
            } else if let Some(Value::Array(lines)) = map.get("line_items") {
                write_rows(&mut wtr, lines);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => write_rows(&mut wtr, arr),
        other => {
            let _ = wtr.write_record([&format_csv_value(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_sweeps(wtr: &mut csv::Writer<io::StdoutLock<'_>>, sweeps: &[Value]) {
    let _ = wtr.write_record(["parameter", "value", "monthly_cash_flow", "cash_on_cash", "cap_rate"]);
    for sweep in sweeps {
        let (Some(Value::String(parameter)), Some(Value::Array(points))) = (
            sweep.get("parameter"),
            sweep.get("points"),
        ) else {
            continue;
        };
        for p in points {
            let cell = |k: &str| p.get(k).map(format_csv_value).unwrap_or_default();
            let _ = wtr.write_record([
                parameter.as_str(),
                &cell("value"),
                &cell("monthly_cash_flow"),
                &cell("cash_on_cash"),
                &cell("cap_rate"),
            ]);
        }
    }
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        return;
    };
    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}
