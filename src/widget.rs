use crate::animation::{
    epoch_millis, Animation, AnimationContext, AnimationState, Animator, FrameDecision, FrameHandle, FrameScheduler,
    PollableState, StopSignal,
};
use crate::color::{CssColor, Rgb};
use crate::config::StarConfig;
use crate::layout::StarLayout;
use crate::pins::{pin_info, ElementPin};
use crate::render::{CellCache, Generation, SvgTemplate, PIXEL_CLASS};
use smart_leds::RGB8;
use std::borrow::Cow;

/// A star of addressable LEDs.
///
/// The host sets properties, calls [`NeopixelStar::update`] to render and to
/// start or stop the built-in animation, and paints pixels with
/// [`NeopixelStar::set_pixel`] as it decodes the LED data line. Painting is
/// best effort: calls before the first render or for pixels that aren't
/// rendered are ignored.
#[derive(Debug)]
pub struct NeopixelStar {
    config: StarConfig,
    layout: Cow<'static, StarLayout>,
    template: Option<SvgTemplate>,
    next_generation: Generation,
    needs_render: bool,
    cells: CellCache,
    animator: Animator,
}

impl Default for NeopixelStar {
    fn default() -> Self {
        Self::new(StarConfig::default())
    }
}

impl NeopixelStar {
    pub fn new(config: StarConfig) -> Self {
        Self::build(config, Cow::Borrowed(StarLayout::embedded()))
    }

    /// Create an element on a custom layout instead of the embedded star
    pub fn with_layout(config: StarConfig, layout: StarLayout) -> Self {
        Self::build(config, Cow::Owned(layout))
    }

    /// Replace the effect used by the built-in animation
    pub fn with_effect<A: Animation + 'static>(mut self, effect: A) -> Self {
        self.animator = Animator::new(Box::new(effect));
        self
    }

    fn build(config: StarConfig, layout: Cow<'static, StarLayout>) -> Self {
        Self {
            config,
            layout,
            template: None,
            next_generation: Generation::FIRST,
            needs_render: true,
            cells: CellCache::default(),
            animator: Animator::default(),
        }
    }

    pub fn config(&self) -> &StarConfig {
        &self.config
    }

    pub fn layout(&self) -> &StarLayout {
        &self.layout
    }

    pub fn set_config(&mut self, config: StarConfig) {
        if self.config != config {
            self.config = config;
            self.needs_render = true;
        }
    }

    pub fn set_pixels(&mut self, pixels: usize) {
        if self.config.pixels != pixels {
            self.config.pixels = pixels;
            self.needs_render = true;
        }
    }

    /// Accepted for compatibility, the cells keep their laid out positions
    pub fn set_pixel_spacing(&mut self, spacing: f32) {
        if self.config.pixel_spacing != spacing {
            self.config.pixel_spacing = spacing;
            self.needs_render = true;
        }
    }

    pub fn set_background(&mut self, background: CssColor) {
        if self.config.background != background {
            self.config.background = background;
            self.needs_render = true;
        }
    }

    pub fn set_animation(&mut self, animation: bool) {
        if self.config.animation != animation {
            self.config.animation = animation;
            self.needs_render = true;
        }
    }

    /// The connectors of the element
    pub fn pin_info(&self) -> Vec<ElementPin> {
        pin_info()
    }

    /// Number of pixel cells the current template holds, 0 before the first render
    pub fn rendered_pixels(&self) -> usize {
        self.template.as_ref().map(SvgTemplate::pixel_count).unwrap_or(0)
    }

    fn cell_count(&self) -> usize {
        self.config.pixels.min(self.layout.len())
    }

    /// Apply the pending property changes and sync the animation loop
    pub fn update<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        if self.needs_render || self.template.is_none() {
            self.render();
        }
        self.updated(scheduler);
    }

    /// Build a fresh template instance.
    ///
    /// Colors applied to the previous instance are discarded.
    pub fn render(&mut self) {
        let generation = self.next_generation;
        self.next_generation = generation.next();
        let cells = self.cell_count();
        self.template = Some(SvgTemplate::build(generation, &self.layout, cells, &self.config.background));
        self.cells.invalidate();
        self.needs_render = false;
        log::debug!("rendered template {generation:?} with {cells} pixels");
    }

    fn updated<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        self.animator.sync(self.config.animation, scheduler);
    }

    /// Paint one pixel.
    ///
    /// Ignored when nothing is rendered yet or `index` is out of the rendered range.
    pub fn set_pixel(&mut self, index: usize, color: Rgb) {
        let Some(template) = self.template.as_mut() else {
            log::trace!("pixel {index} ignored, nothing rendered");
            return;
        };
        let Some(&cell) = self.cells.resolve(template).get(index) else {
            log::trace!("pixel {index} ignored, out of range");
            return;
        };
        template.set_fill(cell, Some(color.to_rgb8()));
    }

    /// Clear the color of every pixel
    pub fn reset(&mut self) {
        let Some(template) = self.template.as_mut() else {
            return;
        };
        for &cell in self.cells.resolve(template) {
            template.set_fill(cell, None);
        }
    }

    /// The color applied to a pixel, `None` if it shows its default fill
    pub fn pixel_color(&self, index: usize) -> Option<RGB8> {
        let template = self.template.as_ref()?;
        let cell = match self.cells.cached(template) {
            Some(cells) => cells.get(index).copied(),
            None => template.query_class(PIXEL_CLASS).get(index).copied(),
        }?;
        template.fill(cell)
    }

    /// The current template as an SVG document
    pub fn to_svg(&self) -> Option<String> {
        self.template.as_ref().map(SvgTemplate::to_svg)
    }

    pub fn generation(&self) -> Option<Generation> {
        self.template.as_ref().map(SvgTemplate::generation)
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animator.state()
    }

    /// A handle that stops the animation loop before it reschedules
    pub fn stop_signal(&self) -> StopSignal {
        self.animator.stop_signal()
    }

    /// Deliver a redraw tick requested by the animation loop.
    ///
    /// Ticks for frames that were cancelled or replaced are ignored.
    pub fn animation_frame<S: FrameScheduler>(
        &mut self,
        handle: FrameHandle,
        time_millis: u64,
        scheduler: &mut S,
    ) -> PollableState {
        match self.animator.accept(handle) {
            FrameDecision::Run => {}
            FrameDecision::Ignore => return PollableState::Unmodified,
            FrameDecision::Stopped => return self.stopped(),
        }
        for pixel in 0..self.rendered_pixels() {
            let color = self.animator.color(&AnimationContext { pixel, time_millis });
            self.set_pixel(pixel, color);
        }
        match self.animator.reschedule(scheduler) {
            PollableState::Done => self.stopped(),
            state => state,
        }
    }

    /// Same as [`NeopixelStar::animation_frame`] using the current wall clock time
    pub fn animation_frame_now<S: FrameScheduler>(&mut self, handle: FrameHandle, scheduler: &mut S) -> PollableState {
        self.animation_frame(handle, epoch_millis(), scheduler)
    }

    // The loop was stopped through its signal: clear the property so the next
    // update doesn't start it again.
    fn stopped(&mut self) -> PollableState {
        self.config.animation = false;
        PollableState::Done
    }
}
