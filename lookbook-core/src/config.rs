use serde::Deserialize;

/// Tunables for the track. All durations and offsets are milliseconds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackConfig {
    /// Pointer travel (px) before a press counts as a drag.
    pub drag_threshold_px: f64,
    /// Duration of the strip translation; `is_dragging` clears this long after release.
    pub drag_settle_ms: u32,

    // ── Open sequence ──
    pub disperse_ms: u32,
    pub reveal_at_ms: u32,
    pub reveal_ms: u32,
    pub reposition_at_ms: u32,
    pub reposition_ms: u32,
    pub info_at_ms: u32,
    pub info_ms: u32,
    pub media_at_ms: u32,

    // ── Close sequence ──
    pub info_fade_ms: u32,
    pub release_at_ms: u32,
    pub restore_siblings_ms: u32,
    pub restore_selected_ms: u32,
    pub restore_header_ms: u32,

    // ── Resize ──
    pub resize_debounce_ms: u32,
    pub resize_position_delay_ms: u32,
    pub resize_finish_delay_ms: u32,

    // ── Layout ──
    /// Idle thumbnail height as a percentage of the viewport's smaller side.
    pub thumbnail_vmin: f64,
    /// Track offset (percent) over which the header fades from 1 to 0.
    pub header_fade_span: f64,
    /// Viewports narrower than this width/height ratio use the stacked layout.
    pub portrait_ratio: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 5.0,
            drag_settle_ms: 1200,
            disperse_ms: 500,
            reveal_at_ms: 10,
            reveal_ms: 550,
            reposition_at_ms: 600,
            reposition_ms: 600,
            info_at_ms: 1000,
            info_ms: 150,
            media_at_ms: 1500,
            info_fade_ms: 500,
            release_at_ms: 300,
            restore_siblings_ms: 600,
            restore_selected_ms: 550,
            restore_header_ms: 750,
            resize_debounce_ms: 1000,
            resize_position_delay_ms: 50,
            resize_finish_delay_ms: 100,
            thumbnail_vmin: 40.0,
            header_fade_span: 25.0,
            portrait_ratio: 1.0,
        }
    }
}

impl TrackConfig {
    /// Time from close acceptance until every restoration animation has finished.
    pub fn close_total_ms(&self) -> u32 {
        self.restore_siblings_ms
            .max(self.restore_selected_ms)
            .max(self.restore_header_ms)
            .max(self.info_fade_ms)
            .max(self.release_at_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg: TrackConfig = serde_json::from_str(r#"{"dragSettleMs": 400}"#).unwrap();
        assert_eq!(cfg.drag_settle_ms, 400);
        assert_eq!(cfg.media_at_ms, 1500);
        assert_eq!(cfg.drag_threshold_px, 5.0);
    }

    #[test]
    fn test_close_total_is_longest_restore() {
        let cfg = TrackConfig::default();
        assert_eq!(cfg.close_total_ms(), 750);
    }
}
