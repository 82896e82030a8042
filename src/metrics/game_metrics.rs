use std::time::Duration;

/// Statistics for the current process only; nothing is written to disk
pub struct GameMetrics {
    /// Time spent in running ticks during the current game
    pub play_time: Duration,
    /// Best final score seen since launch
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            play_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Account for one running tick of the given length
    pub fn on_tick(&mut self, tick: Duration) {
        self.play_time += tick;
    }

    pub fn on_game_start(&mut self) {
        self.play_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.play_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.play_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.play_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.play_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_ticks_accumulate_until_restart() {
        let mut metrics = GameMetrics::new();
        for _ in 0..24 {
            metrics.on_tick(Duration::from_millis(125));
        }
        assert_eq!(metrics.play_time, Duration::from_secs(3));
        assert_eq!(metrics.format_time(), "00:03");

        metrics.on_game_start();
        assert_eq!(metrics.play_time, Duration::ZERO);
    }
}
