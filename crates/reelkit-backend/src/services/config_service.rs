use reelkit_bridge::MessageFromBackend;
use reelkit_bridge::notification::NotificationType;

/// Handles an incoming configuration request (see
/// [`reelkit_bridge::MessageToBackend::ConfigurationRequest`]).
pub async fn handle_config_request(context: super::AppContextHandle) {
    let config = {
        let state = context.state.read().await;
        state.config.clone()
    };
    context
        .send(MessageFromBackend::ConfigurationResponse(config))
        .await;
}

/// Handles a configuration update: replaces the in-memory config, persists
/// it, and echoes the accepted configuration back to the frontend.
pub async fn handle_update_configuration(
    context: super::AppContextHandle,
    config: reelkit_bridge::config::Config,
) {
    {
        let mut state = context.state.write().await;
        state.config = config.clone();
    }

    match crate::config::save_config(&config).await {
        Ok(()) => {
            context
                .send(MessageFromBackend::ConfigurationResponse(config))
                .await;
            context
                .send_notification(NotificationType::Success, "Settings saved.")
                .await;
        }
        Err(error) => {
            log::error!("Failed to persist configuration: {error}");
            context
                .send_notification(
                    NotificationType::Error,
                    format!("Failed to save settings: {error}"),
                )
                .await;
        }
    }
}
