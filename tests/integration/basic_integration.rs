/// Integration tests: engine, SQLite persistence and the MCP layer together
use moodbloom_engine::mcp::McpServer;
use moodbloom_engine::storage::keys;
use moodbloom_engine::*;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 8, 30, 0).unwrap()
    }

    fn open(path: &std::path::Path, clock: ManualClock) -> ProgressionEngine<SqliteStorage, ManualClock> {
        let storage = SqliteStorage::new(path.to_path_buf()).expect("Failed to open storage");
        ProgressionEngine::load(storage, clock)
    }

    #[test]
    fn test_progress_survives_restart() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let clock = ManualClock::new(start());

        {
            let mut engine = open(temp_file.path(), clock.clone());
            engine.complete_onboarding("Robin");
            engine.log_mood(MoodLevel::Happy, "first day");
            engine.add_journal_entry("Went for a run", vec![]);
            engine.complete_ritual(engine.todays_ritual().id);
            // 10 + 10 (First Steps) + 5 + 15
            assert_eq!(engine.current_xp(), 40);
        }

        clock.advance_days(1);
        let engine = open(temp_file.path(), clock.clone());
        let state = engine.state();

        assert!(state.has_completed_onboarding);
        assert_eq!(state.user_profile.name, "Robin");
        assert_eq!(state.current_xp, 40);
        assert_eq!(state.streak.current_streak, 1);
        assert_eq!(state.mood_entries.len(), 1);
        assert_eq!(state.journal_entries.len(), 1);
        assert_eq!(state.completed_rituals.len(), 1);
        assert!(state.achievements.iter().any(|a| a.id == "first-steps" && a.is_unlocked));
        // Today's tasks reset on the new day
        assert!(!engine.has_logged_mood_today());
    }

    #[test]
    fn test_week_long_streak_unlocks_rewards() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let clock = ManualClock::new(start());
        let mut engine = open(temp_file.path(), clock.clone());

        for day in 0..5 {
            if day > 0 {
                clock.advance_days(1);
            }
            engine.log_mood(MoodLevel::Neutral, "");
            engine.complete_ritual(engine.todays_ritual().id);
        }

        assert_eq!(engine.streak().current_streak, 5);
        let unlocked: Vec<&str> = engine
            .unlocked_achievements()
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert!(unlocked.contains(&"consistency"));
        assert!(unlocked.contains(&"ritual-beginner"));
        assert!(unlocked.contains(&"xp-novice"));

        // 5 * (10 + 15) + 10 + 25 + 25 + 20
        assert_eq!(engine.current_xp(), 205);
        let plants: Vec<&str> = engine.available_plants().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(plants, vec!["seedling", "daisy", "sunflower", "rose"]);
    }

    #[test]
    fn test_idle_days_reset_streak_on_load() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let clock = ManualClock::new(start());

        {
            let mut engine = open(temp_file.path(), clock.clone());
            engine.log_mood(MoodLevel::Sad, "");
            clock.advance_days(1);
            engine.log_mood(MoodLevel::Happy, "");
            assert_eq!(engine.streak().current_streak, 2);
        }

        clock.advance_days(3);
        let engine = open(temp_file.path(), clock.clone());
        assert_eq!(engine.streak().current_streak, 0);
        assert_eq!(engine.streak().best_streak, 2);
    }

    #[test]
    fn test_corrupted_key_is_skipped() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let clock = ManualClock::new(start());

        {
            let mut engine = open(temp_file.path(), clock.clone());
            engine.log_mood(MoodLevel::Happy, "");
        }

        {
            let storage = SqliteStorage::new(temp_file.path().to_path_buf()).unwrap();
            storage.set(keys::MOOD_ENTRIES, "{not valid json").unwrap();
        }

        let engine = open(temp_file.path(), clock);
        assert!(engine.state().mood_entries.is_empty());
        assert_eq!(engine.current_xp(), 20);
        assert_eq!(engine.state().plants.len(), 7);
    }

    #[test]
    fn test_every_key_written() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let clock = ManualClock::new(start());

        let mut engine = open(temp_file.path(), clock);
        engine.log_mood(MoodLevel::Happy, "");

        let stored = engine.store().keys().unwrap();
        for key in keys::ALL {
            assert!(stored.iter().any(|k| k == key), "missing key {}", key);
        }
    }

    fn call(id: u64, name: &str, arguments: Value) -> String {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        })
        .to_string()
    }

    async fn send(server: &mut McpServer<SqliteStorage, ManualClock>, line: String) -> Value {
        let response = server.process_line(&line).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    fn tool_text(response: &Value) -> &str {
        response["result"]["content"][0]["text"].as_str().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_mcp_session_over_sqlite() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let clock = ManualClock::new(start());
        let engine = open(temp_file.path(), clock.clone());
        let app = MoodBloomServer::with_engine(engine, Box::new(StaticEntitlement(Entitlement::FREE)));
        let mut server = McpServer::new(app);

        let onboard = send(&mut server, call(1, "onboarding_complete", json!({"name": "Kai"}))).await;
        assert!(tool_text(&onboard).contains("Kai"));

        let mood = send(&mut server, call(2, "mood_log", json!({"mood": 4, "note": "sunny"}))).await;
        assert_eq!(mood["result"]["isError"], json!(false));
        assert!(tool_text(&mood).contains("First Steps"));

        let again = send(&mut server, call(3, "mood_log", json!({"mood": "happy"}))).await;
        assert_eq!(again["result"]["isError"], json!(true));

        let journal = send(&mut server, call(4, "journal_add", json!({"content": "Calm morning"}))).await;
        assert_eq!(journal["result"]["isError"], json!(false));

        let tagged = send(&mut server, call(5, "journal_add", json!({"content": "x", "tags": ["work"]}))).await;
        assert_eq!(tagged["result"]["isError"], json!(true));

        let today = send(&mut server, call(6, "today_overview", json!({}))).await;
        assert!(tool_text(&today).contains("Hello, Kai!"));

        // 10 for the mood, 10 for First Steps, 5 for the journal entry
        let status = send(&mut server, call(7, "progress_status", json!({"include_recent": true}))).await;
        assert!(tool_text(&status).contains("25 XP"));
        assert!(tool_text(&status).contains("sunny"));

        assert_eq!(server.app().engine().current_xp(), 25);

        // Everything the session did is on disk
        let reopened = open(temp_file.path(), clock);
        assert_eq!(reopened.current_xp(), 25);
        assert_eq!(reopened.state().user_profile.name, "Kai");
    }
}
