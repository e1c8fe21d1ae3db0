//! Server-rendered HTML for the two forms and their results.

use std::fmt::Write;

use crate::models::{
    DefaultOnFile, HomeOwnership, LoanApplicant, LoanGrade, LoanIntent, MarketSegment,
    ReservationFeatures,
};
use crate::report::{loan_details, CancellationReport, CreditReport, Locale};

/// Why the local model is missing and the files it is loaded from.
pub struct MissingModel<'a> {
    pub reason: &'a str,
    pub files: &'a [String],
}

/// What to show under a form after a submit.
pub enum Outcome<T> {
    Empty,
    Result(T),
    Error(String),
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(locale: Locale, page: &str, title: &str, body: &str) -> String {
    let (home, loan, footer) = match locale {
        Locale::En => (
            "Cancellations",
            "Credit default",
            "HotelSmart - Cancellation Prediction System",
        ),
        Locale::Pt => (
            "Cancelamentos",
            "Inadimplência",
            "HotelSmart - Sistema de Predição de Cancelamentos",
        ),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 960px; margin: 0 auto; padding: 1rem; }}
label {{ display: block; margin-top: .5rem; }}
.banner {{ padding: .75rem; border-radius: 4px; margin: 1rem 0; }}
.error {{ background: #fde2e2; color: #a00; }}
.success {{ background: #e2f7e2; color: #060; }}
.info {{ background: #e2ecfd; }}
.bar {{ background: #4a7bd0; height: 1rem; }}
footer {{ text-align: center; margin-top: 2rem; color: #666; }}
</style>
</head>
<body>
<nav><a href="/?lang={lang}">{home}</a> | <a href="/loan?lang={lang}">{loan}</a> | <a href="{page}?lang=en">EN</a> <a href="{page}?lang=pt">PT</a></nav>
<h1>{title}</h1>
{body}
<footer>{footer}</footer>
</body>
</html>"#,
        lang = locale.code(),
        page = page,
        title = escape(title),
        body = body,
        home = home,
        loan = loan,
        footer = footer,
    )
}

fn number_input(out: &mut String, name: &str, label: &str, value: impl ToString, attrs: &str) {
    let _ = write!(
        out,
        r#"<label>{label} <input type="number" name="{name}" value="{value}" {attrs}></label>"#,
        label = label,
        name = name,
        value = escape(&value.to_string()),
        attrs = attrs,
    );
}

fn select(out: &mut String, name: &str, label: &str, options: &[&str], selected: &str) {
    let _ = write!(out, r#"<label>{} <select name="{}">"#, label, name);
    for option in options {
        let mark = if *option == selected { " selected" } else { "" };
        let _ = write!(out, r#"<option value="{0}"{1}>{0}</option>"#, option, mark);
    }
    out.push_str("</select></label>");
}

fn error_banner(out: &mut String, locale: Locale, message: &str) {
    let prefix = match locale {
        Locale::En => "Prediction failed",
        Locale::Pt => "Erro ao fazer a predição",
    };
    let _ = write!(
        out,
        r#"<div class="banner error">{}: {}</div>"#,
        prefix,
        escape(message)
    );
}

fn details_summary(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Analysis details",
        Locale::Pt => "Detalhes da Análise",
    }
}

fn list(out: &mut String, items: &[&str]) {
    out.push_str("<ul>");
    for item in items {
        let _ = write!(out, "<li>{}</li>", escape(item));
    }
    out.push_str("</ul>");
}

fn details_table(out: &mut String, rows: &[(&str, String)]) {
    out.push_str("<table>");
    for (name, value) in rows {
        let _ = write!(
            out,
            "<tr><th>{}</th><td>{}</td></tr>",
            escape(name),
            escape(value)
        );
    }
    out.push_str("</table>");
}

/// Reservation form; `unavailable` replaces the form with a persistent banner.
pub fn reservation_page(
    locale: Locale,
    unavailable: Option<&MissingModel<'_>>,
    form: &ReservationFeatures,
    outcome: &Outcome<CancellationReport>,
) -> String {
    let title = match locale {
        Locale::En => "HotelSmart - Cancellation Prediction",
        Locale::Pt => "HotelSmart - Predição de Cancelamentos",
    };
    let mut body = String::new();

    if let Some(missing) = unavailable {
        let (headline, files) = match locale {
            Locale::En => ("The prediction models could not be loaded.", "Required files"),
            Locale::Pt => (
                "Não foi possível carregar os modelos. Verifique se os arquivos estão no diretório correto.",
                "Arquivos necessários",
            ),
        };
        let _ = write!(
            body,
            r#"<div class="banner error">{}<br><small>{}</small></div><div class="banner info">{}:"#,
            headline,
            escape(missing.reason),
            files
        );
        let paths: Vec<&str> = missing.files.iter().map(String::as_str).collect();
        list(&mut body, &paths);
        body.push_str("</div>");
        return layout(locale, "/", title, &body);
    }

    let labels = match locale {
        Locale::En => [
            "Lead time (days in advance)",
            "Arrival month",
            "Arrival date (day of month)",
            "Market segment",
            "Average price per room (R$)",
            "Number of special requests",
            "Predict",
        ],
        Locale::Pt => [
            "Lead Time (dias de antecedência)",
            "Mês de Chegada",
            "Data de Chegada (dia do mês)",
            "Tipo de Segmento de Mercado",
            "Preço Médio por Quarto (R$)",
            "Número de Pedidos Especiais",
            "Fazer Predição",
        ],
    };

    let _ = write!(body, r#"<form method="post" action="/predict?lang={}">"#, locale.code());
    number_input(&mut body, "lead_time", labels[0], form.lead_time, r#"min="0" max="500""#);
    let months: Vec<String> = (1..=12).map(|m| m.to_string()).collect();
    let months: Vec<&str> = months.iter().map(String::as_str).collect();
    select(
        &mut body,
        "arrival_month",
        labels[1],
        &months,
        &form.arrival_month.to_string(),
    );
    number_input(&mut body, "arrival_date", labels[2], form.arrival_date, r#"min="1" max="31""#);
    let segments: Vec<&str> = MarketSegment::ALL.iter().map(|s| s.as_str()).collect();
    select(
        &mut body,
        "market_segment_type",
        labels[3],
        &segments,
        form.market_segment_type.as_str(),
    );
    number_input(
        &mut body,
        "avg_price_per_room",
        labels[4],
        form.avg_price_per_room,
        r#"min="0" max="10000" step="any""#,
    );
    number_input(
        &mut body,
        "no_of_special_requests",
        labels[5],
        form.no_of_special_requests,
        r#"min="0" max="10""#,
    );
    let _ = write!(body, r#"<p><button type="submit">{}</button></p></form>"#, labels[6]);

    match outcome {
        Outcome::Empty => {}
        Outcome::Error(message) => error_banner(&mut body, locale, message),
        Outcome::Result(report) => {
            let class = if report.high_risk { "error" } else { "success" };
            let _ = write!(
                body,
                r#"<div class="banner {}"><strong>{}</strong><br>{}: {}</div>"#,
                class, report.headline, report.probability_label, report.probability
            );
            for bar in &report.chart {
                let _ = write!(
                    body,
                    r#"<div>{} ({:.2}%)<div class="bar" style="width: {:.1}%"></div></div>"#,
                    bar.label,
                    bar.probability * 100.0,
                    bar.probability * 100.0
                );
            }
            let _ = write!(body, r#"<div class="banner info"><strong>{}</strong>"#, report.recommendations_title);
            list(&mut body, &report.recommendations);
            let _ = write!(body, "</div><details><summary>{}</summary>", details_summary(locale));
            details_table(&mut body, &report.details);
            list(&mut body, &report.influence_factors);
            body.push_str("</details>");
        }
    }

    layout(locale, "/", title, &body)
}

pub fn loan_page(locale: Locale, form: &LoanApplicant, outcome: &Outcome<CreditReport>) -> String {
    let title = match locale {
        Locale::En => "Credit Default Prediction",
        Locale::Pt => "Previsão de Inadimplência",
    };
    let labels = match locale {
        Locale::En => [
            "Client age",
            "Client income",
            "Client employment length",
            "Loan amount",
            "Interest rate",
            "Loan to income ratio",
            "Credit history length",
            "Home ownership",
            "Loan purpose",
            "Loan risk grade",
            "Default on file",
            "Predict",
        ],
        Locale::Pt => [
            "Insira a Idade do Cliente",
            "Insira a Renda do Cliente",
            "Insira o tempo de emprego do Cliente",
            "Insira o valor do empréstimo",
            "Insira a Taxa de Juros",
            "Insira a relação empréstimo/renda",
            "Insira o histórico de Crédito",
            "Insira a posse da casa",
            "Insira a Finalidade do Empréstimo",
            "Insira o Grau do Risco do Empréstimo",
            "Insira o registro de inadimplência",
            "Fazer Previsão",
        ],
    };

    let mut body = String::new();
    let _ = write!(body, r#"<form method="post" action="/loan/predict?lang={}">"#, locale.code());
    for (i, (name, value)) in form.numeric_fields().iter().enumerate() {
        number_input(&mut body, name, labels[i], value, r#"step="any""#);
    }
    let ownership: Vec<&str> = HomeOwnership::ALL.iter().map(|o| o.as_str()).collect();
    select(
        &mut body,
        "person_home_ownership",
        labels[7],
        &ownership,
        form.person_home_ownership.as_str(),
    );
    let intents: Vec<&str> = LoanIntent::ALL.iter().map(|o| o.as_str()).collect();
    select(&mut body, "loan_intent", labels[8], &intents, form.loan_intent.as_str());
    let grades: Vec<&str> = LoanGrade::FORM_ORDER.iter().map(|o| o.as_str()).collect();
    select(&mut body, "loan_grade", labels[9], &grades, form.loan_grade.as_str());
    let defaults: Vec<&str> = DefaultOnFile::ALL.iter().map(|o| o.as_str()).collect();
    select(
        &mut body,
        "cb_person_default_on_file",
        labels[10],
        &defaults,
        form.cb_person_default_on_file.as_str(),
    );
    let _ = write!(body, r#"<p><button type="submit">{}</button></p></form>"#, labels[11]);

    match outcome {
        Outcome::Empty => {}
        Outcome::Error(message) => error_banner(&mut body, locale, message),
        Outcome::Result(report) => {
            let class = if report.grant { "success" } else { "error" };
            let _ = write!(body, r#"<div class="banner {}"><h4>{}</h4></div>"#, class, report.message);
            let _ = write!(body, "<details><summary>{}</summary>", details_summary(locale));
            details_table(&mut body, &loan_details(form));
            body.push_str("</details>");
        }
    }

    layout(locale, "/loan", title, &body)
}
