//! Markup stripping for free-text fields.
//!
//! The server stores free text verbatim; the client removes anything
//! tag-shaped before sending, mirroring what the browser form does.

use panorama_core::submission::SubmitPayload;

/// Remove `<...>` tag sequences. An unterminated `<` swallows the rest of
/// the string, so a half-typed tag cannot survive either.
pub fn strip_markup(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  let mut in_tag = false;
  for c in input.chars() {
    match c {
      '<' => in_tag = true,
      '>' if in_tag => in_tag = false,
      _ if !in_tag => out.push(c),
      _ => {}
    }
  }
  out
}

/// Strip markup from the free-text fields a submitter can write prose into.
pub fn apply(payload: &mut SubmitPayload) {
  payload.descricao_necessidade = strip_markup(&payload.descricao_necessidade);
  if let Some(razao) = &payload.razao_social {
    payload.razao_social = Some(strip_markup(razao));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_text_is_untouched() {
    assert_eq!(strip_markup("contrato de locação"), "contrato de locação");
  }

  #[test]
  fn tags_are_removed() {
    assert_eq!(
      strip_markup("<b>urgente</b> preciso de ajuda"),
      "urgente preciso de ajuda"
    );
    assert_eq!(
      strip_markup("<script>alert(1)</script>texto"),
      "alert(1)texto"
    );
  }

  #[test]
  fn unterminated_tag_swallows_the_rest() {
    assert_eq!(strip_markup("texto <img src="), "texto ");
  }

  #[test]
  fn apply_touches_only_free_text_fields() {
    let mut payload = SubmitPayload {
      nome_completo: "Maria <Silva>".to_string(),
      descricao_necessidade: "<p>detalhes</p>".to_string(),
      razao_social: Some("Empresa <X>".to_string()),
      ..SubmitPayload::default()
    };
    apply(&mut payload);
    assert_eq!(payload.descricao_necessidade, "detalhes");
    assert_eq!(payload.razao_social.as_deref(), Some("Empresa "));
    assert_eq!(payload.nome_completo, "Maria <Silva>");
  }
}
