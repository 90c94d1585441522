//! Field-name canonicalization for form payloads.
//!
//! The canonical wire format is snake_case. Older front-end widgets post
//! camelCase keys (`fechaNacimiento`, `anioGraduacion`); the API boundary
//! rewrites them once with [`canonicalize_keys`] so validators and
//! persistence only ever see snake_case.

use serde_json::{Map, Value};

/// Convert a camelCase (or PascalCase) identifier to snake_case.
///
/// Already-snake_case input is returned unchanged.
///
/// ```
/// use admisiones_core::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("fechaNacimiento"), "fecha_nacimiento");
/// assert_eq!(to_snake_case("puntajeICFES"), "puntaje_icfes");
/// assert_eq!(to_snake_case("estrato"), "estrato");
/// ```
pub fn to_snake_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let starts_word = match prev {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                // Acronym boundary: "ICFESScore" -> "icfes_score".
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if starts_word {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Rewrite the top-level keys of a form payload to snake_case.
///
/// When both spellings of a key are present the snake_case value wins.
/// Nested objects (e.g. the `documentos` map) are left untouched.
pub fn canonicalize_keys(input: Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::with_capacity(input.len());
    let mut translated = Vec::new();
    for (key, value) in input {
        let snake = to_snake_case(&key);
        if snake == key {
            out.insert(key, value);
        } else {
            translated.push((snake, value));
        }
    }
    for (key, value) in translated {
        out.entry(key).or_insert(value);
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn converts_camel_case() {
        assert_eq!(to_snake_case("anioGraduacion"), "anio_graduacion");
        assert_eq!(to_snake_case("tipoBachillerato"), "tipo_bachillerato");
        assert_eq!(to_snake_case("telefono2"), "telefono2");
        assert_eq!(to_snake_case("ICFESScore"), "icfes_score");
    }

    #[test]
    fn snake_case_is_untouched() {
        assert_eq!(to_snake_case("posicion_curso"), "posicion_curso");
    }

    #[test]
    fn snake_case_wins_on_collision() {
        let input = json!({"estrato": 3, "Estrato": 5, "fechaNacimiento": "2000-01-01"});
        let out = canonicalize_keys(input.as_object().cloned().unwrap());
        assert_eq!(out["estrato"], 3);
        assert_eq!(out["fecha_nacimiento"], "2000-01-01");
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn nested_keys_are_preserved() {
        let input = json!({"documentos": {"certificadoNotas": "x.pdf"}});
        let out = canonicalize_keys(input.as_object().cloned().unwrap());
        assert_eq!(out["documentos"]["certificadoNotas"], "x.pdf");
    }
}
