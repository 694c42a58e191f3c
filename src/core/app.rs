use crate::background::{FloorplanImage, surface_size};
use crate::config::FloorviewConfig;
use crate::domain::AffineParams;
use crate::route::{self, WatchEvent};
use crate::session::Session;
use crate::session::messages::Msg;
use crate::widget::{Floorplan, OverlayStyle};
use cosmic::ApplicationExt;
use cosmic::app;
use cosmic::iced::Size;
use cosmic::iced_futures::Subscription;

/// Window title
pub const TITLE: &str = "Floorplan Route Viewer";

/// Smallest initial window size
const MIN_WINDOW: (f32, f32) = (1200.0, 800.0);

/// Startup inputs resolved before the window opens
pub struct AppFlags {
    pub config: FloorviewConfig,
    pub params: AffineParams,
    pub background: Option<FloorplanImage>,
}

/// Initial window size for a background of the given native size
pub fn window_size(background: (u32, u32)) -> Size {
    Size::new(
        MIN_WINDOW.0.max(background.0 as f32),
        MIN_WINDOW.1.max(background.1 as f32),
    )
}

pub(crate) fn run(flags: AppFlags) -> cosmic::iced::Result {
    let size = window_size(surface_size(flags.background.as_ref()));
    let settings = cosmic::app::Settings::default().size(size);
    cosmic::app::run::<App>(settings, flags)
}

pub struct App {
    pub core: app::Core,
    pub session: Session,
    pub background: Option<FloorplanImage>,
    pub style: OverlayStyle,
}

impl cosmic::Application for App {
    type Executor = cosmic::executor::Default;

    type Flags = AppFlags;

    type Message = Msg;

    const APP_ID: &'static str = FloorviewConfig::ID;

    fn core(&self) -> &app::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut app::Core {
        &mut self.core
    }

    fn init(
        core: app::Core,
        flags: Self::Flags,
    ) -> (Self, cosmic::iced::Task<cosmic::Action<Self::Message>>) {
        let AppFlags {
            config,
            params,
            background,
        } = flags;

        let session = Session::new(
            params,
            config.route_path.clone(),
            surface_size(background.as_ref()),
        );
        let style = OverlayStyle {
            path: config.path_color.into(),
            current: config.current_color.into(),
            node: config.node_color.into(),
        };

        let mut app = Self {
            core,
            session,
            background,
            style,
        };
        app.set_header_title(TITLE.to_string());

        (app, cosmic::iced::Task::none())
    }

    fn view(&self) -> cosmic::Element<'_, Self::Message> {
        Floorplan::new(self.session.scene(), self.style, Msg::Gesture)
            .background(self.background.as_ref().map(|img| &img.handle))
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
    ) -> cosmic::iced::Task<cosmic::Action<Self::Message>> {
        match message {
            Msg::Gesture(gesture) => {
                self.session.handle_gesture(gesture);
            }
            Msg::Watch(WatchEvent::Changed) => {
                self.session.reload();
            }
            Msg::Watch(WatchEvent::Stopped) => {
                log::warn!(
                    "Stopped watching {}, live reload is disabled",
                    self.session.route_path().display()
                );
            }
        }
        cosmic::iced::Task::none()
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        route::watcher::subscription(self.session.route_path().to_path_buf()).map(Msg::Watch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_size_has_a_floor() {
        assert_eq!(window_size((0, 0)), Size::new(1200.0, 800.0));
        assert_eq!(window_size((640, 480)), Size::new(1200.0, 800.0));
    }

    #[test]
    fn test_window_size_fits_large_floorplan() {
        assert_eq!(window_size((2400, 700)), Size::new(2400.0, 800.0));
        assert_eq!(window_size((1000, 1600)), Size::new(1200.0, 1600.0));
    }
}
