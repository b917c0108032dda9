use super::Remote;
use super::fetch;
use crate::app::{SharedState, lock};
use crate::automation::AutomationChannel;
use crate::domain::Volume;
use crate::error::Failure;
use crate::messages::Notice;

/// The stored volume, asking the app once when it is still unknown.
async fn known_level<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
) -> Result<Option<u8>, Failure> {
    if let Some(level) = lock(state).volume.level() {
        return Ok(Some(level));
    }
    let fetched = fetch::volume(remote).await?;
    lock(state).volume = fetched;
    Ok(fetched.level())
}

pub async fn step<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
    delta: i32,
) -> Result<Notice, Failure> {
    let Some(level) = known_level(remote, state).await? else {
        return Ok(Notice::VolumeUnavailable);
    };
    let target = Volume::adjusted(level, delta);
    remote.run(&remote.scripts().set_volume(target)).await?;
    lock(state).volume = Volume::new(i64::from(target));
    Ok(Notice::Volume(target))
}

/// Mutes when audible, remembering the level; otherwise restores it (or `fallback`).
pub async fn toggle_mute<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
    fallback: u8,
) -> Result<Notice, Failure> {
    let Some(level) = known_level(remote, state).await? else {
        return Ok(Notice::VolumeUnavailable);
    };
    let muting = level > 0;
    let target = if muting {
        0
    } else {
        lock(state).pre_mute_volume.unwrap_or(fallback)
    };
    remote.run(&remote.scripts().set_volume(target)).await?;

    let mut st = lock(state);
    st.volume = Volume::new(i64::from(target));
    if muting {
        st.pre_mute_volume = Some(level);
        Ok(Notice::Muted)
    } else {
        Ok(Notice::Unmuted(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::ChannelReply;
    use crate::features::test_support::{remote, store};

    #[tokio::test]
    async fn step_clamps_to_range() {
        let remote = remote();
        let state = store();
        lock(&state).volume = Volume::new(98);
        assert_eq!(step(&remote, &state, 5).await, Ok(Notice::Volume(100)));
        assert_eq!(lock(&state).volume.level(), Some(100));
    }

    #[tokio::test]
    async fn step_queries_unknown_volume_first() {
        let remote = remote();
        let state = store();
        remote.channel().respond_ok(remote.scripts().volume(), "40");
        assert_eq!(step(&remote, &state, -5).await, Ok(Notice::Volume(35)));
        assert_eq!(
            remote.channel().sent(),
            vec![remote.scripts().volume(), remote.scripts().set_volume(35)]
        );
    }

    #[tokio::test]
    async fn step_gives_up_when_volume_stays_unknown() {
        let remote = remote();
        let state = store();
        remote.channel().respond_ok(remote.scripts().volume(), "-1");
        assert_eq!(step(&remote, &state, 5).await, Ok(Notice::VolumeUnavailable));
        assert_eq!(remote.channel().sent().len(), 1);
    }

    #[tokio::test]
    async fn mute_round_trip_restores_level() {
        let remote = remote();
        let state = store();
        lock(&state).volume = Volume::new(72);

        assert_eq!(toggle_mute(&remote, &state, 50).await, Ok(Notice::Muted));
        assert_eq!(lock(&state).volume.level(), Some(0));
        assert_eq!(lock(&state).pre_mute_volume, Some(72));

        assert_eq!(
            toggle_mute(&remote, &state, 50).await,
            Ok(Notice::Unmuted(72))
        );
        assert_eq!(lock(&state).volume.level(), Some(72));
    }

    #[tokio::test]
    async fn unmute_from_zero_uses_fallback() {
        let remote = remote();
        let state = store();
        lock(&state).volume = Volume::new(0);
        assert_eq!(
            toggle_mute(&remote, &state, 50).await,
            Ok(Notice::Unmuted(50))
        );
        assert_eq!(lock(&state).volume.level(), Some(50));
    }

    #[tokio::test]
    async fn failed_mute_changes_nothing() {
        let remote = remote();
        let state = store();
        lock(&state).volume = Volume::new(30);
        remote
            .channel()
            .respond(remote.scripts().set_volume(0), ChannelReply::timed_out());
        assert_eq!(
            toggle_mute(&remote, &state, 50).await,
            Err(Failure::TimedOut)
        );
        let st = lock(&state);
        assert_eq!(st.volume.level(), Some(30));
        assert_eq!(st.pre_mute_volume, None);
    }
}
