//! Reedline completion with Tab-triggered menu.
//!
//! Type "/" then Tab to see commands. Menu filters as you type.

use nu_ansi_term::{Color, Style};
use reedline::{
    ColumnarMenu, Completer, Emacs, Highlighter, KeyCode, KeyModifiers,
    MenuBuilder, Prompt, PromptEditMode, PromptHistorySearch,
    PromptHistorySearchStatus, Reedline, ReedlineEvent, ReedlineMenu,
    Span, StyledText, Suggestion,
};
use std::borrow::Cow;

/// All slash commands with descriptions
pub const COMMANDS: &[(&str, &str)] = &[
    ("/?", "Mostrar ajuda"),
    ("/a", "Anexar documento"),
    ("/attach", "Anexar documento"),
    ("/clear", "Limpar a tela"),
    ("/cls", "Limpar a tela"),
    ("/delete", "Remover proposta arquivada"),
    ("/exit", "Sair"),
    ("/export", "Exportar conversa para .txt"),
    ("/h", "Mostrar ajuda"),
    ("/help", "Mostrar ajuda"),
    ("/hist", "Listar propostas arquivadas"),
    ("/history", "Listar propostas arquivadas"),
    ("/load", "Abrir proposta arquivada"),
    ("/n", "Nova conversa"),
    ("/new", "Nova conversa"),
    ("/open", "Abrir proposta arquivada"),
    ("/q", "Sair"),
    ("/quit", "Sair"),
    ("/rm", "Remover proposta arquivada"),
    ("/stats", "Estatísticas do histórico"),
    ("/v", "Mostrar versão"),
    ("/version", "Mostrar versão"),
];

/// Completer for assistant commands
#[derive(Clone, Default)]
pub struct PropostaCompleter {
    pub titles: Vec<String>,
}

impl PropostaCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_titles(&mut self, titles: Vec<String>) {
        self.titles = titles;
    }
}

impl Completer for PropostaCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        if pos > line.len() {
            return Vec::new();
        }

        let input = &line[..pos];

        if input.is_empty() || !input.starts_with('/') {
            return Vec::new();
        }

        // Command completion (no space yet)
        if !input.contains(' ') {
            let prefix = input.to_lowercase();
            return COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.to_lowercase().starts_with(&prefix))
                .take(10)
                .map(|(cmd, desc)| Suggestion {
                    value: cmd.to_string(),
                    description: Some(desc.to_string()),
                    extra: None,
                    span: Span::new(0, pos),
                    append_whitespace: true,
                    style: None,
                })
                .collect();
        }

        // Archived title completion: /open xxx, /load xxx, /delete xxx, /rm xxx
        if input.starts_with("/open ")
            || input.starts_with("/load ")
            || input.starts_with("/delete ")
            || input.starts_with("/rm ")
        {
            let prefix = input
                .split_once(' ')
                .map(|(_, rest)| rest.to_lowercase())
                .unwrap_or_default();
            let start = input.find(' ').map(|i| i + 1).unwrap_or(pos);
            return self
                .titles
                .iter()
                .filter(|t| prefix.is_empty() || t.to_lowercase().starts_with(&prefix))
                .take(10)
                .map(|t| Suggestion {
                    value: t.clone(),
                    description: None,
                    extra: None,
                    span: Span::new(start, pos),
                    append_whitespace: false,
                    style: None,
                })
                .collect();
        }

        Vec::new()
    }
}

/// Assistant prompt
pub struct PropostaPrompt {
    pub attachment: Option<String>,
}

impl PropostaPrompt {
    pub fn new() -> Self {
        Self { attachment: None }
    }

    pub fn with_attachment(attachment: Option<String>) -> Self {
        Self { attachment }
    }
}

impl Default for PropostaPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for PropostaPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        match &self.attachment {
            // Staged file shown with a magenta marker
            Some(file_name) => Cow::Owned(format!(
                "\x1b[1;33mproposta\x1b[0m \x1b[35m[📎 {}]\x1b[0m",
                file_name
            )),
            None => Cow::Borrowed("\x1b[1;33mproposta\x1b[0m"),
        }
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed(" 📋 ")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(&self, hs: PromptHistorySearch) -> Cow<'_, str> {
        let prefix = match hs.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({}search: {}) ", prefix, hs.term))
    }
}

/// Syntax highlighter
#[derive(Clone)]
pub struct PropostaHighlighter;

impl Highlighter for PropostaHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if line.starts_with('/') {
            let cmd_end = line.find(' ').unwrap_or(line.len());
            let cmd = &line[..cmd_end];
            let is_valid = COMMANDS.iter().any(|(c, _)| *c == cmd);

            if is_valid {
                styled.push((Style::new().fg(Color::Cyan).bold(), cmd.to_string()));
            } else {
                styled.push((Style::new().fg(Color::Yellow), cmd.to_string()));
            }

            if cmd_end < line.len() {
                styled.push((Style::default(), line[cmd_end..].to_string()));
            }
        } else {
            styled.push((Style::default(), line.to_string()));
        }

        styled
    }
}

/// Create reedline with Tab-triggered completion menu
pub fn create_reedline(completer: PropostaCompleter) -> Reedline {
    // Clean menu style - no heavy borders
    let completion_menu = Box::new(
        ColumnarMenu::default()
            .with_name("completion_menu")
            .with_columns(1)
            .with_column_padding(2)
            .with_text_style(Style::new().fg(Color::Default))
            .with_selected_text_style(
                Style::new()
                    .fg(Color::Black)
                    .on(Color::Cyan)
            )
            .with_description_text_style(Style::new().fg(Color::DarkGray))
    );

    let mut keybindings = reedline::default_emacs_keybindings();

    // Tab to show/navigate menu
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );

    // Shift+Tab to go back
    keybindings.add_binding(
        KeyModifiers::SHIFT,
        KeyCode::BackTab,
        ReedlineEvent::MenuPrevious,
    );

    Reedline::create()
        .with_completer(Box::new(completer))
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_quick_completions(true)
        .with_partial_completions(true)
        .with_highlighter(Box::new(PropostaHighlighter))
        .with_edit_mode(Box::new(Emacs::new(keybindings)))
}

/// Check if a command is complete (exact match)
pub fn is_complete_command(input: &str) -> bool {
    COMMANDS.iter().any(|(cmd, _)| *cmd == input)
}
