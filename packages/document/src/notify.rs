use escopo_core::ProjectRecord;
use url::form_urlencoded::byte_serialize;

/// `mailto:` link announcing a scope package to `recipient`
pub fn notification_link(recipient: &str, record: &ProjectRecord) -> String {
    let subject = format!(
        "Escopo {} - {} ({})",
        record.discipline, record.site, record.client
    );
    let body = format!(
        "Olá,\n\nO escopo de {} da obra {} foi atualizado.\n\
         Fornecedor: {}\nRevisão: {}\nStatus: {}\n\nAtenciosamente,\nSIARCON",
        record.discipline,
        record.site,
        record.supplier,
        record.revision,
        record.status.label()
    );

    format!(
        "mailto:{}?subject={}&body={}",
        encode(recipient.trim()).replace("%40", "@"),
        encode(&subject),
        encode(&body)
    )
}

/// Percent-encoding with `%20` for spaces, as mail clients expect
fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
