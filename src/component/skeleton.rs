use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
};

use crate::{actions::Action, tui::Event};

use super::{Component, EventHandlingStatus, WidgetExt};

const SHADE_DARK: (u8, u8, u8) = (58, 58, 64);
const SHADE_LIGHT: (u8, u8, u8) = (120, 120, 132);

/// Default loop length in ticks (~1.2s at the gallery's 20 ticks/s).
const DEFAULT_PERIOD: u64 = 24;

/// Looping animation styles for [`Skeleton`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum SkeletonAnimation {
    /// A lighter band sweeps across the block, then restarts.
    #[default]
    Shimmer,
    /// The whole block brightens and dims.
    Pulse,
    /// A brightness wave rolls through the block.
    Wave,
}

/// A placeholder block standing in for content that is still loading.
///
/// Purely cosmetic: it consumes no events and loops until removed from the
/// screen. The animation advances on [`Action::Tick`], so its speed follows
/// the host's tick rate.
#[derive(Clone, Debug)]
pub struct Skeleton {
    animation: SkeletonAnimation,
    period: u64,
    phase: u64,
}

impl Skeleton {
    pub fn new(animation: SkeletonAnimation) -> Self {
        Self {
            animation,
            period: DEFAULT_PERIOD,
            phase: 0,
        }
    }

    pub fn with_period(mut self, period: u64) -> Self {
        self.period = period.max(2);
        self
    }

    pub fn animation(&self) -> SkeletonAnimation {
        self.animation
    }

    pub fn phase(&self) -> u64 {
        self.phase
    }

    fn shade(level: f32) -> Color {
        let level = level.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * level).round() as u8;
        Color::Rgb(
            lerp(SHADE_DARK.0, SHADE_LIGHT.0),
            lerp(SHADE_DARK.1, SHADE_LIGHT.1),
            lerp(SHADE_DARK.2, SHADE_LIGHT.2),
        )
    }

    /// Brightness of one cell column for the current frame, in 0..=1.
    fn level_at(&self, col: u16, width: u16) -> f32 {
        let t = self.phase as f32 / self.period as f32;
        match self.animation {
            SkeletonAnimation::Shimmer => {
                let band = (width as f32 / 4.0).max(2.0);
                let center = t * (width as f32 + 2.0 * band) - band;
                (1.0 - (col as f32 - center).abs() / band).clamp(0.0, 1.0)
            }
            SkeletonAnimation::Pulse => 1.0 - (2.0 * t - 1.0).abs(),
            SkeletonAnimation::Wave => {
                let x = col as f32 / width.max(1) as f32;
                0.5 + 0.5 * (std::f32::consts::TAU * (x - t)).sin()
            }
        }
    }
}

impl WidgetExt for Skeleton {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = (0..area.height)
            .map(|_| {
                (0..area.width)
                    .map(|col| {
                        let level = self.level_at(col, area.width);
                        Span::styled(" ", Style::default().bg(Self::shade(level)))
                    })
                    .collect::<Vec<Span>>()
                    .into()
            })
            .collect();
        frame.render_widget(Paragraph::new(Text::from(lines)), area);
    }
}

impl Component for Skeleton {
    fn handle_events(&mut self, _event: &Event) -> EventHandlingStatus {
        EventHandlingStatus::Ignored
    }

    fn update(&mut self, action: &Action) {
        if matches!(action, Action::Tick) {
            self.phase = (self.phase + 1) % self.period;
        }
    }
}
