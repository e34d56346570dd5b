//! Load progress milestones for the globe assembly sequence.

/// The five fixed progress milestones reported during globe assembly.
///
/// Milestones are ordered by load sequence; each maps to a percentage for
/// display. `Complete` is reported only when every texture has loaded — a
/// failed fetch means it is never reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadMilestone {
    /// Sphere geometry generated.
    GeometryReady,
    /// Color (albedo) map fetched and decoded.
    ColorLoaded,
    /// Bump map fetched and decoded.
    BumpLoaded,
    /// Specular map fetched and decoded.
    SpecularLoaded,
    /// Cloud map loaded and all layers assembled.
    Complete,
}

impl LoadMilestone {
    /// Display percentage for this milestone.
    pub fn percent(self) -> u8 {
        match self {
            Self::GeometryReady => 20,
            Self::ColorLoaded => 40,
            Self::BumpLoaded => 60,
            Self::SpecularLoaded => 80,
            Self::Complete => 100,
        }
    }
}

/// Receives progress milestones as assembly advances.
pub trait ProgressSink {
    /// Called once per milestone, in order.
    fn on_progress(&mut self, milestone: LoadMilestone);
}

/// A sink that records milestones, for tests and logging.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Milestones in the order they were reported.
    pub milestones: Vec<LoadMilestone>,
}

impl ProgressSink for RecordingSink {
    fn on_progress(&mut self, milestone: LoadMilestone) {
        self.milestones.push(milestone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_percentages() {
        assert_eq!(LoadMilestone::GeometryReady.percent(), 20);
        assert_eq!(LoadMilestone::ColorLoaded.percent(), 40);
        assert_eq!(LoadMilestone::BumpLoaded.percent(), 60);
        assert_eq!(LoadMilestone::SpecularLoaded.percent(), 80);
        assert_eq!(LoadMilestone::Complete.percent(), 100);
    }

    #[test]
    fn test_milestones_strictly_increase() {
        let all = [
            LoadMilestone::GeometryReady,
            LoadMilestone::ColorLoaded,
            LoadMilestone::BumpLoaded,
            LoadMilestone::SpecularLoaded,
            LoadMilestone::Complete,
        ];
        for pair in all.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].percent() < pair[1].percent());
        }
        assert_eq!(all.last().unwrap().percent(), 100);
    }

    #[test]
    fn test_recording_sink_preserves_order() {
        let mut sink = RecordingSink::default();
        sink.on_progress(LoadMilestone::GeometryReady);
        sink.on_progress(LoadMilestone::ColorLoaded);
        assert_eq!(
            sink.milestones,
            vec![LoadMilestone::GeometryReady, LoadMilestone::ColorLoaded]
        );
    }
}
