mod banner;
mod chat;
mod guide;
mod install;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use banner::StorageBanner;
pub use chat::ChatWidget;
pub use guide::GuideView;
pub use install::InstallDialog;
pub use state::ViewError;
