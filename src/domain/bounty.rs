use super::models::{Action, Bounty, Channel, ChannelBounties, Transaction, ALL_COUNTRIES_CODE};

/// Computes the per-channel bounty board.
///
/// Pairs every action with the transactions executed against it, keeps the
/// open bounties (flagged open or attempted at least once) and groups them
/// under their owning channel. Channels with no open bounty are left out of
/// the result entirely. Bounties keep the order of `actions`, the result
/// keeps the order of `channels`.
pub fn make_bounties(
    actions: &[Action],
    transactions: Option<&[Transaction]>,
    channels: &[Channel],
) -> Vec<ChannelBounties> {
    if actions.is_empty() {
        return Vec::new();
    }

    let bounties = get_bounties(actions, transactions.unwrap_or_default());

    generate_channel_bounties(channels, bounties)
}

fn get_bounties(actions: &[Action], transactions: &[Transaction]) -> Vec<Bounty> {
    actions
        .iter()
        .map(|action| {
            let matched = transactions
                .iter()
                .filter(|t| t.action_id == action.public_id)
                .cloned()
                .collect();
            Bounty::new(action.clone(), matched)
        })
        .collect()
}

fn generate_channel_bounties(channels: &[Channel], bounties: Vec<Bounty>) -> Vec<ChannelBounties> {
    if channels.is_empty() || bounties.is_empty() {
        return Vec::new();
    }

    let open_bounties: Vec<Bounty> = bounties.into_iter().filter(Bounty::is_open).collect();

    channels
        .iter()
        .filter(|c| open_bounties.iter().any(|b| b.action.channel_id == c.id))
        .map(|channel| ChannelBounties {
            channel: channel.clone(),
            bounties: open_bounties
                .iter()
                .filter(|b| b.action.channel_id == channel.id)
                .cloned()
                .collect(),
        })
        .collect()
}

/// Sorted distinct country codes across the action set, with the
/// all-countries marker in front.
pub fn country_codes(actions: &[Action]) -> Vec<String> {
    let mut codes: Vec<String> = actions.iter().map(|a| a.country_alpha2.clone()).collect();
    codes.sort();
    codes.dedup();
    codes.insert(0, ALL_COUNTRIES_CODE.to_string());
    codes
}
