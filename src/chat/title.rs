//! Proposal title derivation.
//!
//! The first generated reply usually names the equipment or system being
//! quoted. The title is taken from the first line mentioning one of the
//! domain keywords, truncated to four words; otherwise a date-stamped
//! default is used.

use chrono::NaiveDate;

/// Keywords that mark a line as title material.
pub const TITLE_KEYWORDS: &[&str] = &["Sistema", "Equipamento", "Instalação"];

/// Derive a title from reply text, falling back to today's default.
pub fn derive_title(reply: &str) -> String {
    keyword_title(reply).unwrap_or_else(default_title)
}

/// First four words of the first line containing a domain keyword.
pub fn keyword_title(reply: &str) -> Option<String> {
    reply.lines().find_map(|line| {
        if !TITLE_KEYWORDS.iter().any(|keyword| line.contains(keyword)) {
            return None;
        }
        let words: Vec<&str> = line.split_whitespace().take(4).collect();
        if words.is_empty() {
            None
        } else {
            Some(words.join(" "))
        }
    })
}

/// Date-stamped default title for today.
pub fn default_title() -> String {
    default_title_on(chrono::Local::now().date_naive())
}

/// Date-stamped default title for a given day.
pub fn default_title_on(date: NaiveDate) -> String {
    format!("Proposta {}", date.format("%d/%m/%Y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Keyword Title Tests
    // =========================================================================

    #[test]
    fn test_keyword_line_truncated_to_four_words() {
        let reply = "Segue a proposta.\nSistema de Bombeamento Industrial completo e revisado";
        assert_eq!(
            keyword_title(reply),
            Some("Sistema de Bombeamento Industrial".to_string())
        );
    }

    #[test]
    fn test_keyword_line_shorter_than_four_words() {
        assert_eq!(keyword_title("Equipamento novo"), Some("Equipamento novo".to_string()));
    }

    #[test]
    fn test_keyword_mid_line_still_matches() {
        let reply = "Orçamento para Instalação elétrica predial completa";
        assert_eq!(
            keyword_title(reply),
            Some("Orçamento para Instalação elétrica".to_string())
        );
    }

    #[test]
    fn test_first_matching_line_wins() {
        let reply = "Equipamento A\nSistema B";
        assert_eq!(keyword_title(reply), Some("Equipamento A".to_string()));
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(keyword_title("sistema de ar condicionado"), None);
    }

    #[test]
    fn test_no_keyword_returns_none() {
        assert_eq!(keyword_title("Olá! Como posso ajudar?"), None);
    }

    #[test]
    fn test_empty_reply_returns_none() {
        assert_eq!(keyword_title(""), None);
    }

    // =========================================================================
    // Default Title Tests
    // =========================================================================

    #[test]
    fn test_default_title_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(default_title_on(date), "Proposta 15/01/2024");
    }

    #[test]
    fn test_default_title_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(default_title_on(date), "Proposta 05/03/2024");
    }

    // =========================================================================
    // Derive Tests
    // =========================================================================

    #[test]
    fn test_derive_prefers_keyword_title() {
        assert_eq!(
            derive_title("Sistema hidráulico completo para fazenda"),
            "Sistema hidráulico completo para".to_string()
        );
    }

    #[test]
    fn test_derive_falls_back_to_dated_default() {
        let title = derive_title("Não recebi resposta do servidor.");
        assert!(title.starts_with("Proposta "));
        // dd/mm/yyyy tail
        assert_eq!(title.len(), "Proposta ".len() + 10);
    }
}
