//! HTML pages for the input form and the prediction result

use fire_area_core::{BurnArea, Month, ParsedForm, Weekday};
use std::fmt::Write;

const STYLESHEET: &str = r#"<link rel="stylesheet" href="/static/style.css">"#;

/// Numeric inputs after the categorical selectors: (name, label, step)
const NUMERIC_INPUTS: [(&str, &str, &str); 8] = [
    ("FFMC", "FFMC index", "0.1"),
    ("DMC", "DMC index", "0.1"),
    ("DC", "DC index", "0.1"),
    ("ISI", "ISI index", "0.1"),
    ("temp", "Temperature (°C)", "0.1"),
    ("RH", "Relative humidity (%)", "1"),
    ("wind", "Wind speed (km/h)", "0.1"),
    ("rain", "Rain (mm/m²)", "0.1"),
];

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n{STYLESHEET}\n</head>\n<body>\n<main>\n{body}</main>\n</body>\n</html>\n"
    )
}

/// Input form posted to `/predict/`
pub fn render_form() -> String {
    let mut body = String::new();
    body.push_str("<h1>Forest Fire Burn Area Predictor</h1>\n");
    body.push_str("<form action=\"/predict/\" method=\"post\">\n");

    for (name, label) in [("X", "X coordinate (1-9)"), ("Y", "Y coordinate (2-9)")] {
        let _ = writeln!(
            body,
            "<label for=\"{name}\">{label}</label>\n\
             <input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"1\" max=\"9\" step=\"1\" required>"
        );
    }

    body.push_str(
        "<label for=\"month\">Month</label>\n<select id=\"month\" name=\"month\" required>\n",
    );
    for month in Month::ALL {
        let _ = writeln!(body, "<option value=\"{month}\">{month}</option>");
    }
    body.push_str("</select>\n");

    body.push_str("<label for=\"day\">Day</label>\n<select id=\"day\" name=\"day\" required>\n");
    for day in Weekday::ALL {
        let _ = writeln!(body, "<option value=\"{day}\">{day}</option>");
    }
    body.push_str("</select>\n");

    for (name, label, step) in NUMERIC_INPUTS {
        let _ = writeln!(
            body,
            "<label for=\"{name}\">{label}</label>\n\
             <input type=\"number\" id=\"{name}\" name=\"{name}\" step=\"{step}\" required>"
        );
    }

    body.push_str("<button type=\"submit\">Predict</button>\n</form>\n");
    page("Forest Fire Burn Area Predictor", &body)
}

/// Result page: prediction, the numeric record and the submitted tokens
pub fn render_result(parsed: &ParsedForm, area: BurnArea) -> String {
    let mut body = String::new();
    body.push_str("<h1>Prediction Result</h1>\n");
    let _ = writeln!(
        body,
        "<p class=\"prediction\">Predicted burned area: <strong>{area}</strong> hectares</p>"
    );
    let _ = writeln!(
        body,
        "<p>Month: {} &middot; Day: {}</p>",
        escape_html(&parsed.month_token),
        escape_html(&parsed.day_token)
    );

    body.push_str("<table>\n<thead><tr><th>Feature</th><th>Value</th></tr></thead>\n<tbody>\n");
    for (name, value) in parsed.record.named_values() {
        let _ = writeln!(body, "<tr><td>{name}</td><td>{value}</td></tr>");
    }
    body.push_str("</tbody>\n</table>\n<p><a href=\"/\">Make another prediction</a></p>\n");
    page("Prediction Result", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fire_area_core::{FeatureRecord, TargetTransform};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
        assert_eq!(escape_html("aug"), "aug");
    }

    #[test]
    fn test_form_lists_every_field() {
        let html = render_form();
        for name in fire_area_core::FEATURE_NAMES {
            assert!(html.contains(&format!("name=\"{name}\"")), "missing input {name}");
        }
        assert!(html.contains("<option value=\"dec\">"));
        assert!(html.contains("<option value=\"sun\">"));
        assert!(html.contains("action=\"/predict/\""));
    }

    #[test]
    fn test_result_shows_prediction_record_and_tokens() {
        let parsed = ParsedForm {
            record: FeatureRecord {
                x: 7,
                y: 5,
                month: Month::Aug,
                day: Weekday::Fri,
                ffmc: 91.0,
                dmc: 166.9,
                dc: 752.6,
                isi: 7.1,
                temp: 25.9,
                rh: 41,
                wind: 3.6,
                rain: 0.0,
            },
            month_token: "aug".into(),
            day_token: "fri".into(),
        };
        let area = BurnArea::from_raw(1.0_f64.ln_1p(), TargetTransform::Log1p).unwrap();
        let html = render_result(&parsed, area);
        assert!(html.contains("<strong>1.00</strong>"));
        assert!(html.contains("Month: aug"));
        assert!(html.contains("Day: fri"));
        assert!(html.contains("<tr><td>month</td><td>8</td></tr>"));
        assert!(html.contains("<tr><td>day</td><td>5</td></tr>"));
        assert!(html.contains("<tr><td>DMC</td><td>166.9</td></tr>"));
        assert!(html.contains("<tr><td>RH</td><td>41</td></tr>"));
    }
}
