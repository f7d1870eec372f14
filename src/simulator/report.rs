//! Aggregated results of headless runs.

use crate::field::Lane;
use serde::Serialize;

/// Outcome of one headless run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub seed: u64,
    pub score: u64,
    pub run_time_ms: u64,
    /// Lane of the fatal obstacle, `None` if the run hit the time limit.
    pub hit_lane: Option<Lane>,
    pub switches: u32,
    pub energized_switches: u32,
    pub peak_multiplier: u32,
    pub jumps: u32,
    pub spawn_events: u64,
    pub final_scroll_speed: f64,
}

impl RunStats {
    pub fn timed_out(&self) -> bool {
        self.hit_lane.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LaneDeaths {
    pub ground: u32,
    pub sky: u32,
    pub underground: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_timed_out: u32,
    pub avg_score: f64,
    pub best_score: u64,
    pub avg_run_time_ms: f64,
    pub median_run_time_ms: u64,
    pub avg_peak_multiplier: f64,
    pub avg_spawn_events: f64,
    pub deaths_by_lane: LaneDeaths,
    pub runs: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let n = f64::from(num_runs.max(1));

        let mut deaths_by_lane = LaneDeaths::default();
        for lane in runs.iter().filter_map(|r| r.hit_lane) {
            match lane {
                Lane::Ground => deaths_by_lane.ground += 1,
                Lane::Sky => deaths_by_lane.sky += 1,
                Lane::Underground => deaths_by_lane.underground += 1,
            }
        }

        let mut times: Vec<u64> = runs.iter().map(|r| r.run_time_ms).collect();
        times.sort_unstable();
        let median_run_time_ms = times.get(times.len() / 2).copied().unwrap_or(0);

        Self {
            num_runs,
            runs_timed_out: runs.iter().filter(|r| r.timed_out()).count() as u32,
            avg_score: runs.iter().map(|r| r.score as f64).sum::<f64>() / n,
            best_score: runs.iter().map(|r| r.score).max().unwrap_or(0),
            avg_run_time_ms: runs.iter().map(|r| r.run_time_ms as f64).sum::<f64>() / n,
            median_run_time_ms,
            avg_peak_multiplier: runs.iter().map(|r| f64::from(r.peak_multiplier)).sum::<f64>()
                / n,
            avg_spawn_events: runs.iter().map(|r| r.spawn_events as f64).sum::<f64>() / n,
            deaths_by_lane,
            runs,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("═══════════════════════════════════════════════\n");
        out.push_str(&format!("Runs:               {}\n", self.num_runs));
        out.push_str(&format!("Timed out:          {}\n", self.runs_timed_out));
        out.push_str(&format!("Avg score:          {:.1}\n", self.avg_score));
        out.push_str(&format!("Best score:         {}\n", self.best_score));
        out.push_str(&format!(
            "Avg survival:       {:.1}s (median {:.1}s)\n",
            self.avg_run_time_ms / 1000.0,
            self.median_run_time_ms as f64 / 1000.0
        ));
        out.push_str(&format!("Avg peak multiplier: x{:.2}\n", self.avg_peak_multiplier));
        out.push_str(&format!("Avg spawn events:   {:.1}\n", self.avg_spawn_events));
        out.push_str(&format!(
            "Deaths by lane:     ground {} / sky {} / underground {}\n",
            self.deaths_by_lane.ground, self.deaths_by_lane.sky, self.deaths_by_lane.underground
        ));
        out.push_str("═══════════════════════════════════════════════\n");
        out
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(score: u64, run_time_ms: u64, hit_lane: Option<Lane>) -> RunStats {
        RunStats {
            seed: 0,
            score,
            run_time_ms,
            hit_lane,
            switches: 0,
            energized_switches: 0,
            peak_multiplier: 1,
            jumps: 0,
            spawn_events: 0,
            final_scroll_speed: 200.0,
        }
    }

    #[test]
    fn test_aggregates() {
        let report = SimReport::from_runs(vec![
            stats(100, 1000, Some(Lane::Ground)),
            stats(300, 5000, Some(Lane::Sky)),
            stats(200, 3000, None),
        ]);

        assert_eq!(report.num_runs, 3);
        assert_eq!(report.runs_timed_out, 1);
        assert_eq!(report.best_score, 300);
        assert!((report.avg_score - 200.0).abs() < 1e-9);
        assert_eq!(report.median_run_time_ms, 3000);
        assert_eq!(report.deaths_by_lane.ground, 1);
        assert_eq!(report.deaths_by_lane.sky, 1);
        assert_eq!(report.deaths_by_lane.underground, 0);
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new());
        assert_eq!(report.num_runs, 0);
        assert_eq!(report.avg_score, 0.0);
        assert!(report.to_text().contains("Runs:"));
    }

    #[test]
    fn test_json_has_runs() {
        let report = SimReport::from_runs(vec![stats(5, 16, Some(Lane::Underground))]);
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["num_runs"], 1);
        assert_eq!(json["runs"][0]["hit_lane"], "Underground");
    }
}
