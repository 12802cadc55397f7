// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-visible message texts.
//!
//! Every string the bot sends lives here, and outcome enums are rendered
//! to text here and nowhere else. The rest of the dialog engine deals in
//! typed values only, so its logic is testable independent of wording.
//!
//! The texts are Russian; the keyboard labels in [`crate::commands`] must
//! stay in sync with the menu rendered by the channel adapter.

use voxtask_core::{CreateTaskOutcome, ListTasksOutcome, PlanPeriod};

pub const WELCOME: &str = "Добро пожаловать! Выберите опцию:";

pub const SEND_VOICE_PROMPT: &str =
    "Пожалуйста, отправьте голосовое сообщение для расшифровки.";

pub const SET_USER_ID_FIRST: &str = "Пожалуйста, сначала установите ваш User ID для Битрикс24 с помощью команды \"Установить User ID\".";

pub const SET_WEBHOOK_FIRST: &str = "Пожалуйста, сначала установите ваш Webhook URL для Битрикс24 с помощью команды \"Установить Webhook URL\".";

pub const NOTHING_TO_EDIT: &str =
    "Нет текста для изменения. Пожалуйста, сначала отправьте голосовое сообщение.";

pub const NOTHING_TO_CONFIRM: &str =
    "Нет текста для подтверждения. Пожалуйста, сначала отправьте голосовое сообщение.";

pub const TITLE_PROMPT: &str = "Введите заголовок для задачи:";

pub const DEADLINE_PROMPT: &str =
    "Введите дедлайн для задачи (в формате YYYY-MM-DD HH:MM:SS):";

pub const TRANSCRIPTION_FAILED: &str =
    "Извините, произошла ошибка при транскрипции аудио.";

pub const WEBHOOK_PROMPT: &str =
    "Пожалуйста, отправьте новый Webhook URL для Битрикс24.";

pub const USER_ID_PROMPT: &str =
    "Пожалуйста, отправьте ваш User ID для Битрикс24.";

pub const SETTINGS_SAVE_FAILED: &str =
    "Извините, произошла ошибка при сохранении настроек.";

pub fn transcript(text: &str) -> String {
    format!("Транскрипция: {text}")
}

pub fn current_text_prompt(text: &str) -> String {
    format!("Текущий текст: {text}\nВведите новый текст:")
}

pub fn text_updated(text: &str) -> String {
    format!("Текст обновлен: {text}")
}

pub fn webhook_set(url: &str) -> String {
    format!("Webhook URL установлен: {url}")
}

pub fn user_id_set(user_id: &str) -> String {
    format!("User ID установлен: {user_id}")
}

/// Renders a task-listing outcome under the period's header line.
pub fn plans(period: PlanPeriod, outcome: &ListTasksOutcome) -> String {
    let header = match period {
        PlanPeriod::Day => "Планы на день",
        PlanPeriod::Week => "Планы на неделю",
        PlanPeriod::Month => "Планы на месяц",
    };
    let body = match outcome {
        ListTasksOutcome::MissingWebhook => {
            "Webhook URL не установлен. Пожалуйста, установите Webhook URL для Битрикс24.".to_string()
        }
        ListTasksOutcome::NoTasks => "Нет задач на выбранный период.".to_string(),
        ListTasksOutcome::Tasks(tasks) => tasks
            .iter()
            .map(|t| format!("- {} (дедлайн: {})", t.title, t.deadline))
            .collect::<Vec<_>>()
            .join("\n"),
        ListTasksOutcome::TransportFailed => {
            "Извините, произошла ошибка при получении задач из Битрикс24.".to_string()
        }
    };
    format!("{header}:\n{body}")
}

pub fn create_result(outcome: &CreateTaskOutcome) -> &'static str {
    match outcome {
        CreateTaskOutcome::Created => "Задача успешно создана в Битрикс24.",
        CreateTaskOutcome::MissingWebhook => {
            "Не удалось создать задачу в Битрикс24: Webhook URL не найден."
        }
        CreateTaskOutcome::MissingUserId => {
            "Не удалось создать задачу в Битрикс24: идентификатор пользователя не найден."
        }
        CreateTaskOutcome::Rejected => "Не удалось создать задачу в Битрикс24.",
        CreateTaskOutcome::TransportFailed => {
            "Извините, произошла ошибка при создании задачи в Битрикс24."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxtask_core::TaskSummary;

    #[test]
    fn plans_renders_task_lines() {
        let outcome = ListTasksOutcome::Tasks(vec![
            TaskSummary {
                title: "Отчёт".into(),
                deadline: "2025-01-02T10:00:00+03:00".into(),
            },
            TaskSummary {
                title: "Звонок".into(),
                deadline: "2025-01-03T12:00:00+03:00".into(),
            },
        ]);
        assert_eq!(
            plans(PlanPeriod::Week, &outcome),
            "Планы на неделю:\n- Отчёт (дедлайн: 2025-01-02T10:00:00+03:00)\n- Звонок (дедлайн: 2025-01-03T12:00:00+03:00)"
        );
    }

    #[test]
    fn plans_renders_sentinels() {
        assert_eq!(
            plans(PlanPeriod::Day, &ListTasksOutcome::NoTasks),
            "Планы на день:\nНет задач на выбранный период."
        );
        assert_eq!(
            plans(PlanPeriod::Month, &ListTasksOutcome::MissingWebhook),
            "Планы на месяц:\nWebhook URL не установлен. Пожалуйста, установите Webhook URL для Битрикс24."
        );
    }

    #[test]
    fn create_result_distinguishes_outcomes() {
        assert_eq!(
            create_result(&CreateTaskOutcome::Created),
            "Задача успешно создана в Битрикс24."
        );
        assert_eq!(
            create_result(&CreateTaskOutcome::Rejected),
            "Не удалось создать задачу в Битрикс24."
        );
        assert_ne!(
            create_result(&CreateTaskOutcome::MissingWebhook),
            create_result(&CreateTaskOutcome::MissingUserId)
        );
    }

    #[test]
    fn prompt_interpolation() {
        assert_eq!(
            current_text_prompt("купить молоко"),
            "Текущий текст: купить молоко\nВведите новый текст:"
        );
        assert_eq!(transcript("купить молоко"), "Транскрипция: купить молоко");
        assert_eq!(
            webhook_set("https://example.bitrix24.ru/rest/1/abc"),
            "Webhook URL установлен: https://example.bitrix24.ru/rest/1/abc"
        );
    }
}
