use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use iced::alignment;
use iced::executor;
use iced::theme::{self, Theme};
use iced::time;
use iced::widget::{button, column, container, pick_list, row, text};
use iced::window;
use iced::{
    mouse, Alignment, Application, Color, Command, Element, Event, Length, Point, Settings, Size,
    Subscription, Vector,
    widget::canvas::{self, Canvas, Frame, Path, Program},
    Renderer,
};

use sign_logic::animation::{Animator, Pattern};
use sign_logic::canvas::Canvas as SignCanvas;
use sign_logic::cpl::{read_cpl_file, split_banks};
use sign_logic::{Rgb, SignPoint};

// Global scaling factor: 1 mm = 3.779527559 pixels (based on 96 dpi, 1 inch = 25.4 mm)
const MM_TO_PIXELS: f32 = 3.779_527_559;
const FRAME_INTERVAL_MS: u64 = 1000 / 30; // 30 Hz

// Canvas size in mm (100mm height x 140mm width)
const CANVAS_WIDTH_MM: f32 = 140.0;
const CANVAS_HEIGHT_MM: f32 = 100.0;
const SQUARE_SIZE_MM: f32 = 1.0;
const CONTROLS_HEIGHT_PX: f32 = 64.0;

/// Desktop preview of the sign animations over the real LED layout.
#[derive(Debug, Parser)]
struct Args {
    /// CPL spreadsheet export (CSV) with the LED placements
    #[clap(default_value = "sign_cpl.csv")]
    cpl: PathBuf,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let (matrix, sign) = split_banks(read_cpl_file(&args.cpl)?);
    log::info!(
        "loaded {} matrix and {} sign placements from {}",
        matrix.len(),
        sign.len(),
        args.cpl.display()
    );

    let position = match load_window_position() {
        Some((x, y)) => window::Position::Specific(Point::new(x as f32, y as f32)),
        None => window::Position::Centered,
    };

    SignPreview::run(Settings {
        window: window::Settings {
            size: Size::new(
                CANVAS_WIDTH_MM * MM_TO_PIXELS,
                CANVAS_HEIGHT_MM * MM_TO_PIXELS + CONTROLS_HEIGHT_PX,
            ),
            position,
            resizable: false,
            exit_on_close_request: false,
            ..window::Settings::default()
        },
        flags: PreviewFlags { matrix, sign },
        antialiasing: true,
        ..Settings::default()
    })?;
    Ok(())
}

#[derive(Debug, Default)]
struct PreviewFlags {
    matrix: Vec<SignPoint>,
    sign: Vec<SignPoint>,
}

struct SignPreview {
    matrix: Vec<SignPoint>,
    animator: Animator,
    colors: Vec<Rgb>,
    frame: u64,
    running: bool,
    pending_trigger: bool,
    window_position: Option<(i32, i32)>,
}

#[derive(Debug, Clone)]
enum PreviewMessage {
    ToggleAnimation,
    FrameTick(Instant),
    PatternSelected(Pattern),
    Pulse,
    EventOccurred(Event),
}

impl Application for SignPreview {
    type Message = PreviewMessage;
    type Theme = Theme;
    type Executor = executor::Default;
    type Flags = PreviewFlags;

    fn new(flags: PreviewFlags) -> (SignPreview, Command<PreviewMessage>) {
        let canvas = SignCanvas::new(flags.sign);
        let colors = vec![Rgb::BLACK; canvas.len()];
        (
            SignPreview {
                matrix: flags.matrix,
                animator: Animator::new(Pattern::Sweep, canvas),
                colors,
                frame: 0,
                running: true,
                pending_trigger: false,
                window_position: None,
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        String::from("LED Sign Preview")
    }

    fn update(&mut self, message: PreviewMessage) -> Command<PreviewMessage> {
        match message {
            PreviewMessage::ToggleAnimation => {
                self.running = !self.running;
            }
            PreviewMessage::FrameTick(_now) => {
                self.frame += 1;
                let trigger = self.pending_trigger;
                self.pending_trigger = false;
                let frame = self.frame;
                self.animator.step(frame, trigger, &mut self.colors);
            }
            PreviewMessage::PatternSelected(pattern) => {
                log::info!("switching to pattern {pattern}");
                self.animator.set_pattern(pattern);
            }
            PreviewMessage::Pulse => {
                self.pending_trigger = true;
            }
            PreviewMessage::EventOccurred(Event::Window(_, window::Event::Moved { x, y })) => {
                self.window_position = Some((x, y));
            }
            PreviewMessage::EventOccurred(Event::Window(id, window::Event::CloseRequested)) => {
                save_window_position(self.window_position);
                return window::close(id);
            }
            PreviewMessage::EventOccurred(_) => {}
        }
        Command::none()
    }

    fn subscription(&self) -> Subscription<PreviewMessage> {
        let frames = if self.running {
            time::every(Duration::from_millis(FRAME_INTERVAL_MS)).map(PreviewMessage::FrameTick)
        } else {
            Subscription::none()
        };
        let events = iced::event::listen().map(PreviewMessage::EventOccurred);
        Subscription::batch(vec![frames, events])
    }

    fn view(&self) -> Element<PreviewMessage> {
        let button = |label| {
            button(text(label).horizontal_alignment(alignment::Horizontal::Center))
                .padding(10)
                .width(80)
        };

        let toggle_button = {
            let label = if self.running { "Stop" } else { "Start" };
            button(label).on_press(PreviewMessage::ToggleAnimation)
        };

        let pulse_button = button("Pulse")
            .style(theme::Button::Destructive)
            .on_press(PreviewMessage::Pulse);

        let patterns = pick_list(
            &Pattern::ALL[..],
            Some(self.animator.pattern()),
            PreviewMessage::PatternSelected,
        )
        .padding(10);

        let frame_readout = text(format!("frame {}", self.frame)).size(20);

        let canvas = Canvas::new(LedLayout {
            matrix: self.matrix.clone(),
            sign: self.animator.canvas().points().to_vec(),
            colors: self.colors.clone(),
        })
        .width(Length::Fixed(CANVAS_WIDTH_MM * MM_TO_PIXELS))
        .height(Length::Fixed(CANVAS_HEIGHT_MM * MM_TO_PIXELS));

        let controls = row![
            container(patterns).padding(5),
            container(toggle_button).padding(5),
            container(pulse_button).padding(5),
            container(frame_readout).padding(5)
        ]
        .align_items(Alignment::Center)
        .spacing(10);

        container(column![canvas, controls])
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

struct LedLayout {
    matrix: Vec<SignPoint>,
    sign: Vec<SignPoint>,
    colors: Vec<Rgb>,
}

impl<Message> Program<Message> for LedLayout {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: iced::Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        let background = Path::rectangle(Point::ORIGIN, bounds.size());
        frame.fill(&background, Color::from_rgb8(50, 50, 50));

        // The matrix bank stays off in the preview; the sign bank carries
        // the animation colors.
        for point in &self.matrix {
            draw_square(&mut frame, point, Color::BLACK);
        }
        for (point, color) in self.sign.iter().zip(&self.colors) {
            draw_square(&mut frame, point, Color::from_rgb8(color.r, color.g, color.b));
        }

        vec![frame.into_geometry()]
    }
}

/// Draws one 1mm placement square, rotated the way it sits on the board.
/// Board origin is bottom-left, so the y axis is flipped.
fn draw_square(frame: &mut Frame, point: &SignPoint, color: Color) {
    let size = SQUARE_SIZE_MM * MM_TO_PIXELS;
    let x = point.x * MM_TO_PIXELS;
    let y = (CANVAS_HEIGHT_MM - point.y) * MM_TO_PIXELS;
    frame.with_save(|frame| {
        frame.translate(Vector::new(x, y));
        frame.rotate(point.rotation.to_radians());
        let square = Path::rectangle(
            Point::new(-size / 2.0, -size / 2.0),
            Size::new(size, size),
        );
        frame.fill(&square, color);
    });
}

fn position_cache_path() -> PathBuf {
    std::env::temp_dir().join("sign_preview_position.txt")
}

/// Restores the previous window position. Malformed cache contents fall
/// back to default placement.
fn load_window_position() -> Option<(i32, i32)> {
    let data = std::fs::read_to_string(position_cache_path()).ok()?;
    let mut parts = data.trim().split(',');
    let x = parts.next()?.trim().parse().ok()?;
    let y = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y))
}

fn save_window_position(position: Option<(i32, i32)>) {
    let Some((x, y)) = position else {
        return;
    };
    if let Err(err) = std::fs::write(position_cache_path(), format!("{x},{y}")) {
        log::warn!("could not save window position: {err}");
    }
}
