use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

#[derive(Debug, PartialEq)]
pub enum Query {
    Channels(Option<Bytes>),
    Numsub(Vec<Bytes>),
    Numpat,
}

/// Introspection of the pub/sub subsystem: active channels, subscriber counts per channel and
/// the number of subscribed patterns.
///
/// Ref: <https://redis.io/docs/latest/commands/pubsub/>
#[derive(Debug, PartialEq)]
pub struct Pubsub {
    pub query: Query,
}

impl Executable for Pubsub {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let pubsub = &ctx.state.pubsub;
        let reply = match self.query {
            Query::Channels(pattern) => {
                Frame::array_of_bulks(pubsub.channel_names(pattern.as_deref()))
            }
            Query::Numsub(channels) => Frame::Array(
                channels
                    .into_iter()
                    .flat_map(|channel| {
                        let count = pubsub.numsub(&channel) as i64;
                        [Frame::Bulk(channel), Frame::Integer(count)]
                    })
                    .collect(),
            ),
            Query::Numpat => Frame::Integer(pubsub.numpat() as i64),
        };
        Ok(reply)
    }
}

impl TryFrom<&mut CommandParser> for Pubsub {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let sub = parser.next_string()?;
        let query = match sub.to_uppercase().as_str() {
            "CHANNELS" if parser.remaining() <= 1 => {
                let pattern = if parser.has_next() {
                    Some(parser.next_bytes()?)
                } else {
                    None
                };
                Query::Channels(pattern)
            }
            "NUMSUB" => Query::Numsub(parser.rest()?),
            "NUMPAT" if !parser.has_next() => Query::Numpat,
            _ => return Err(CommandError::UnknownSubcommand(sub, "PUBSUB")),
        };
        Ok(Self { query })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, bulks, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn reports_subscriptions() {
        let cmd = Command::try_from(frame(&["PUBSUB", "channels", "n*"])).unwrap();
        assert_eq!(
            cmd,
            Command::Pubsub(Pubsub {
                query: Query::Channels(Some(Bytes::from("n*"))),
            })
        );

        let mut harness = Harness::new();
        harness.run(&["SUBSCRIBE", "news", "sport"]);
        harness.run(&["PSUBSCRIBE", "a*", "b*"]);

        assert_eq!(harness.exec(cmd).unwrap(), bulks(&["news"]));
        assert_eq!(
            harness.run(&["PUBSUB", "CHANNELS"]),
            bulks(&["news", "sport"])
        );
        assert_eq!(
            harness.run(&["PUBSUB", "NUMSUB", "news", "other"]),
            Frame::Array(vec![
                bulk("news"),
                Frame::Integer(1),
                bulk("other"),
                Frame::Integer(0),
            ])
        );
        assert_eq!(harness.run(&["PUBSUB", "NUMPAT"]), Frame::Integer(2));
    }

    #[test]
    fn unknown_subcommand() {
        let mut harness = Harness::new();
        assert_eq!(
            harness.run(&["PUBSUB", "shards"]),
            CommandError::UnknownSubcommand("shards".to_string(), "PUBSUB").into()
        );
    }
}
