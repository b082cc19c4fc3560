use crate::Stopwatch;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct LapMark {
    pub fastest: bool,
    pub slowest: bool,
}

/// Marks fastest and slowest among `completed`, in the same order. Ties are
/// all marked. Fewer than two laps mark nothing.
pub fn analyze_laps(completed: &[u64]) -> Vec<LapMark> {
    let unmarked = vec![LapMark::default(); completed.len()];
    if completed.len() < 2 {
        return unmarked;
    }
    let (Some(&min), Some(&max)) = (completed.iter().min(), completed.iter().max()) else {
        return unmarked;
    };
    completed
        .iter()
        .map(|&lap| LapMark {
            fastest: lap == min,
            slowest: lap == max,
        })
        .collect()
}

/// A lap as listed on screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LapRow {
    /// 1 for the oldest lap.
    pub number: usize,
    pub duration_ms: u64,
    pub mark: LapMark,
    /// The open accumulator row.
    pub current: bool,
}

/// Every lap, newest first. The first row is the accumulator and shows the
/// live segment while running.
pub fn lap_rows(stopwatch: &Stopwatch) -> Vec<LapRow> {
    let laps = stopwatch.laps();
    let marks = analyze_laps(stopwatch.completed_laps());

    laps.iter()
        .enumerate()
        .map(|(pos, &lap)| {
            let current = pos == 0;
            LapRow {
                number: laps.len() - pos,
                duration_ms: if current { stopwatch.current_lap_ms() } else { lap },
                mark: if current { LapMark::default() } else { marks[pos - 1] },
                current,
            }
        })
        .collect()
}
