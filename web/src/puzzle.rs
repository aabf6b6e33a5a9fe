use chrono::prelude::*;
use gloo::timers::callback::Interval;
use gloo::timers::future::TimeoutFuture;
use suraido_core as game;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlCanvasElement, HtmlImageElement, HtmlInputElement, HtmlSelectElement};
use web_sys::{MouseEvent, Url};
use yew::prelude::*;

use crate::canvas::{self, CanvasPainter};
use crate::settings::{Settings, SIDE_CHOICES};
use crate::utils::*;

/// Yield between shuffle moves so the surface can present each step.
const SHUFFLE_TICK_MS: u32 = 5;
/// Yield between interpolated animation frames.
const FRAME_TICK_MS: u32 = 1;
const CLOCK_TICK_MS: u32 = 500;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap()
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewPuzzleState {
    NoImage,
    Shuffling,
    InProgress,
    Solved,
}

impl ViewPuzzleState {
    const fn class(self) -> &'static str {
        match self {
            Self::NoImage => "no-image",
            Self::Shuffling => "shuffling",
            Self::InProgress => "in-progress",
            Self::Solved => "solved",
        }
    }
}

/// One puzzle round: the engine plus presentation-side timing. Never
/// persisted; a new image or a size change starts a fresh session.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PuzzleSession {
    pub engine: game::PuzzleEngine,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl PuzzleSession {
    fn new(engine: game::PuzzleEngine) -> Self {
        Self {
            engine,
            started_at: None,
            ended_at: None,
        }
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    fn on_successful_move(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        if self.engine.is_solved() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }

    fn view_state(&self) -> ViewPuzzleState {
        use game::EngineState::*;
        match self.engine.state() {
            Empty => ViewPuzzleState::NoImage,
            Shuffling => ViewPuzzleState::Shuffling,
            Ready if self.engine.is_solved() && self.engine.move_count() > 0 => {
                ViewPuzzleState::Solved
            }
            Ready => ViewPuzzleState::InProgress,
        }
    }
}

/// Pending cooperative work. While not `Idle`, clicks are ignored: move
/// requests are serialized rather than allowed to overlap a running
/// animation or shuffle.
#[derive(Clone, Debug)]
enum Busy {
    Idle,
    Shuffling {
        policy: game::RandomShuffle,
        remaining: u16,
    },
    Animating {
        frames: Vec<game::Frame>,
        next: usize,
    },
}

pub(crate) enum Msg {
    FileSelected(Event),
    ImageLoaded,
    ShuffleTick,
    AnimateTick,
    CanvasClick(MouseEvent),
    TogglePreview,
    SideChanged(Event),
    Restart,
    UpdateClock,
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct PuzzleProps {
    /// Forced shuffle seed from the location hash, random otherwise.
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct PuzzleView {
    settings: Settings,
    session: PuzzleSession,
    busy: Busy,
    image_url: Option<AttrValue>,
    image: Option<HtmlImageElement>,
    forced_seed: Option<u64>,
    prev_time: u32,
    canvas_ref: NodeRef,
    preview_ref: NodeRef,
    image_ref: NodeRef,
    _clock: Interval,
}

impl PuzzleView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(CLOCK_TICK_MS, move || link.send_message(Msg::UpdateClock))
    }

    fn schedule(ctx: &Context<Self>, delay_ms: u32, msg: Msg) {
        let link = ctx.link().clone();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            link.send_message(msg);
        });
    }

    fn painter(&self) -> Option<CanvasPainter> {
        let surface = self.canvas_ref.cast::<HtmlCanvasElement>()?;
        let image = self.image.clone()?;
        let geometry = self.session.engine.geometry()?;
        CanvasPainter::new(&surface, image, self.session.engine.config().size, geometry)
    }

    fn apply_frame(&self, frame: &game::Frame) {
        if let Some(painter) = self.painter() {
            painter.apply(frame);
        }
    }

    fn redraw(&self) {
        self.apply_frame(&self.session.engine.full_frame());
    }

    fn redraw_preview(&self) {
        let Some(surface) = self.preview_ref.cast::<HtmlCanvasElement>() else {
            return;
        };
        let (Some(image), Some(geometry)) = (&self.image, self.session.engine.geometry()) else {
            return;
        };
        canvas::draw_preview(&surface, image, self.session.engine.config().size, geometry);
    }

    /// Fresh session for the current image: identity grid, preview frame,
    /// then one shuffle move per tick until ready.
    fn start_puzzle(&mut self, ctx: &Context<Self>, geometry: game::ImageGeometry) -> bool {
        self.session = PuzzleSession::new(game::PuzzleEngine::new(self.settings.puzzle_config()));
        let frame = self.session.engine.load_image(geometry);
        self.redraw_preview();
        self.apply_frame(&frame);

        let seed = self.forced_seed.unwrap_or_else(js_random_seed);
        log::debug!("shuffling with seed {}", seed);
        self.busy = Busy::Shuffling {
            policy: game::RandomShuffle::from_seed(seed),
            remaining: self.session.engine.config().shuffle_moves,
        };
        Self::schedule(ctx, SHUFFLE_TICK_MS, Msg::ShuffleTick);
        true
    }

    fn restart(&mut self, ctx: &Context<Self>) -> bool {
        let Some(image) = self.image.clone() else {
            return false;
        };
        match game::ImageGeometry::new(image.natural_width(), image.natural_height()) {
            Ok(geometry) => self.start_puzzle(ctx, geometry),
            Err(err) => {
                log::warn!("cannot restart: {}", err);
                false
            }
        }
    }

    fn click_to_tile(&self, event: &MouseEvent) -> Option<game::Tile> {
        let surface = self.canvas_ref.cast::<HtmlCanvasElement>()?;
        let rect = surface.get_bounding_client_rect();
        let size = self.session.engine.config().size;
        let tile_size = rect.width() / f64::from(size.side());

        let x = f64::from(event.client_x()) - rect.left();
        let y = f64::from(event.client_y()) - rect.top();
        let cell = game::cell_at_point(x, y, tile_size, size)?;
        self.session.engine.tile_at(cell)
    }
}

impl Component for PuzzleView {
    type Message = Msg;
    type Properties = PuzzleProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings = Settings::local_or_default();
        Self {
            session: PuzzleSession::new(game::PuzzleEngine::new(settings.puzzle_config())),
            settings,
            busy: Busy::Idle,
            image_url: None,
            image: None,
            forced_seed: ctx.props().seed,
            prev_time: 0,
            canvas_ref: NodeRef::default(),
            preview_ref: NodeRef::default(),
            image_ref: NodeRef::default(),
            _clock: Self::create_timer(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(event) => {
                let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                    return false;
                };
                let Some(file) = input.files().and_then(|files| files.get(0)) else {
                    return false;
                };
                match Url::create_object_url_with_blob(&file) {
                    Ok(url) => {
                        if let Some(old) = self.image_url.take() {
                            let _ = Url::revoke_object_url(&old);
                        }
                        log::debug!("selected image {:?}", file.name());
                        self.image = None;
                        self.image_url = Some(AttrValue::from(url));
                        true
                    }
                    Err(err) => {
                        log::warn!("could not create object URL: {:?}", err);
                        false
                    }
                }
            }
            Msg::ImageLoaded => {
                let Some(image) = self.image_ref.cast::<HtmlImageElement>() else {
                    return false;
                };
                // decode failures never get here; zero-size is all that's left
                let geometry =
                    match game::ImageGeometry::new(image.natural_width(), image.natural_height()) {
                        Ok(geometry) => geometry,
                        Err(err) => {
                            log::warn!("rejected image: {}", err);
                            return false;
                        }
                    };
                self.image = Some(image);
                self.start_puzzle(ctx, geometry)
            }
            Msg::ShuffleTick => {
                let done = match &mut self.busy {
                    Busy::Shuffling { policy, remaining } => {
                        match self.session.engine.shuffle_move(policy) {
                            Ok(_) => *remaining -= 1,
                            Err(err) => {
                                log::warn!("shuffle step failed: {}", err);
                                *remaining = 0;
                            }
                        }
                        *remaining == 0
                    }
                    _ => return false,
                };

                self.redraw();
                if done {
                    if let Err(err) = self.session.engine.finish_shuffle() {
                        log::warn!("could not finish shuffle: {}", err);
                    }
                    self.busy = Busy::Idle;
                    true
                } else {
                    Self::schedule(ctx, SHUFFLE_TICK_MS, Msg::ShuffleTick);
                    false
                }
            }
            Msg::CanvasClick(event) => {
                if !matches!(self.busy, Busy::Idle) || !self.session.engine.is_ready() {
                    return false;
                }
                let Some(tile) = self.click_to_tile(&event) else {
                    return false;
                };

                match self.session.engine.request_move(tile) {
                    game::MoveOutcome::NotMoveable => false,
                    game::MoveOutcome::Moved(transition) => {
                        self.session.on_successful_move(utc_now());
                        if transition.animated {
                            self.busy = Busy::Animating {
                                frames: transition.frames().collect(),
                                next: 0,
                            };
                            Self::schedule(ctx, FRAME_TICK_MS, Msg::AnimateTick);
                        } else {
                            self.redraw();
                        }
                        true
                    }
                }
            }
            Msg::AnimateTick => {
                let step = match &mut self.busy {
                    Busy::Animating { frames, next } => {
                        let frame = frames.get(*next).cloned();
                        *next += 1;
                        frame
                    }
                    _ => return false,
                };

                match step {
                    Some(frame) => {
                        self.apply_frame(&frame);
                        Self::schedule(ctx, FRAME_TICK_MS, Msg::AnimateTick);
                        false
                    }
                    None => {
                        self.busy = Busy::Idle;
                        self.redraw();
                        if self.session.engine.is_solved() {
                            log::info!(
                                "solved in {} moves, {} seconds",
                                self.session.engine.move_count(),
                                self.session.elapsed_secs(utc_now()),
                            );
                        }
                        true
                    }
                }
            }
            Msg::TogglePreview => {
                self.settings.show_preview = !self.settings.show_preview;
                self.settings.local_save();
                true
            }
            Msg::SideChanged(event) => {
                let Some(select) = event.target_dyn_into::<HtmlSelectElement>() else {
                    return false;
                };
                let Ok(side) = select.value().parse::<u8>() else {
                    return false;
                };
                if self.settings.side == side {
                    return false;
                }
                self.settings.side = side;
                self.settings.local_save();
                let _ = self.restart(ctx);
                true
            }
            Msg::Restart => self.restart(ctx),
            Msg::UpdateClock => {
                let time = self.session.elapsed_secs(utc_now());
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let state = self.session.view_state();
        let moves = format_for_counter(self.session.engine.move_count() as i32);
        let clock = format_for_counter(self.session.elapsed_secs(utc_now()) as i32);

        let on_canvas_click = ctx.link().callback(Msg::CanvasClick);
        let on_file = ctx.link().callback(Msg::FileSelected);
        let on_image_load = ctx.link().callback(|_: Event| Msg::ImageLoaded);
        let on_preview = ctx.link().callback(|_: Event| Msg::TogglePreview);
        let on_side = ctx.link().callback(Msg::SideChanged);
        let on_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Restart
        });

        let playable = matches!(state, ViewPuzzleState::InProgress) && matches!(self.busy, Busy::Idle);

        html! {
            <div class={classes!("suraido", state.class())}>
                <nav>
                    <aside>{moves}</aside>
                    <span><button class={state.class()} onclick={on_new_game}/></span>
                    <aside>{clock}</aside>
                </nav>
                <canvas
                    ref={self.canvas_ref.clone()}
                    class={classes!("board", playable.then_some("playable"))}
                    width="480"
                    height="480"
                    onclick={on_canvas_click}
                />
                <canvas
                    ref={self.preview_ref.clone()}
                    class={classes!("preview", (!self.settings.show_preview).then_some("hidden"))}
                    width="480"
                    height="480"
                />
                <footer>
                    <label>
                        <input
                            type="checkbox"
                            checked={self.settings.show_preview}
                            onchange={on_preview}
                        />
                        {"Show preview"}
                    </label>
                    <select onchange={on_side}>
                        {
                            for SIDE_CHOICES.iter().map(|&side| html! {
                                <option
                                    value={side.to_string()}
                                    selected={side == self.settings.side}
                                >
                                    { format!("{0}x{0}", side) }
                                </option>
                            })
                        }
                    </select>
                    <input type="file" accept="image/*" onchange={on_file}/>
                </footer>
                if let Some(url) = &self.image_url {
                    <img
                        ref={self.image_ref.clone()}
                        src={url.clone()}
                        onload={on_image_load}
                        style="display:none"
                    />
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game::{GridSize, ImageGeometry, PuzzleConfig, PuzzleEngine, Tile};

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(secs * 1000).unwrap()
    }

    fn ready_session() -> PuzzleSession {
        let config = PuzzleConfig::new(GridSize::new(4), 200, 10);
        let mut engine = PuzzleEngine::new(config);
        engine.load_image(ImageGeometry::new(640, 640).unwrap());
        engine.finish_shuffle().unwrap();
        PuzzleSession::new(engine)
    }

    #[test]
    fn clock_runs_from_first_move_and_stops_at_solve() {
        let mut session = ready_session();
        assert_eq!(session.elapsed_secs(at(100)), 0);

        session.engine.request_move(Tile::new(11));
        session.on_successful_move(at(10));
        assert_eq!(session.elapsed_secs(at(13)), 3);

        // sliding the tile back restores identity: solved
        session.engine.request_move(Tile::new(11));
        session.on_successful_move(at(15));
        assert_eq!(session.elapsed_secs(at(60)), 5);
    }

    #[test]
    fn view_state_tracks_session_progress() {
        let config = PuzzleConfig::new(GridSize::new(4), 200, 10);
        let mut session = PuzzleSession::new(PuzzleEngine::new(config));
        assert_eq!(session.view_state(), ViewPuzzleState::NoImage);

        session.engine.load_image(ImageGeometry::new(640, 640).unwrap());
        assert_eq!(session.view_state(), ViewPuzzleState::Shuffling);

        session.engine.finish_shuffle().unwrap();
        // identity grid but no moves yet: still counts as play in progress
        assert_eq!(session.view_state(), ViewPuzzleState::InProgress);

        session.engine.request_move(Tile::new(11));
        session.on_successful_move(at(0));
        assert_eq!(session.view_state(), ViewPuzzleState::InProgress);

        session.engine.request_move(Tile::new(11));
        session.on_successful_move(at(1));
        assert_eq!(session.view_state(), ViewPuzzleState::Solved);
    }
}
