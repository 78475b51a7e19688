#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::TimeZone;
    use pulse_client::{
        api::{Comment, CommentId, CommentUser, ReactionKind, SortOrder, Time, UserId, Uuid},
        prelude::*,
        CommentDump, CommentEngine, EngineConfig, Thread,
    };
    use pulse_mock_host::MockHost;

    fn user(n: u128) -> CommentUser {
        CommentUser::new(UserId(Uuid::from_u128(n)), format!("user {n}"))
    }

    fn comment(n: u128, parent: Option<u128>, ts: i64) -> Comment {
        Comment::new(
            CommentId(Uuid::from_u128(n)),
            parent.map(|p| CommentId(Uuid::from_u128(p))),
            user(100 + n % 3),
            format!("comment {n}"),
            chrono::Utc.timestamp_opt(ts, 0).unwrap(),
        )
    }

    fn ticking_clock() -> impl Fn() -> Time {
        let tick = Cell::new(1_000);
        move || {
            tick.set(tick.get() + 1);
            chrono::Utc.timestamp_opt(tick.get(), 0).unwrap()
        }
    }

    fn engine(config: EngineConfig, comments: Vec<Comment>) -> CommentEngine<MockHost> {
        let host = MockHost::with_comments(comments.clone());
        CommentEngine::new(config, user(1), comments, host).with_clock(ticking_clock())
    }

    fn nodes(threads: &[Thread]) -> Vec<&Thread> {
        threads.iter().flat_map(|t| t.iter()).collect()
    }

    #[test]
    fn host_persists_what_the_engine_shows() {
        let mut e = engine(EngineConfig::default(), vec![comment(1, None, 1)]);
        let root = CommentId(Uuid::from_u128(1));
        let reply = e.add_comment("first reply", Some(root)).unwrap();
        e.toggle_reaction(root, ReactionKind::like()).unwrap();
        e.edit_comment(reply.id, "edited reply").unwrap();
        e.add_comment("", Some(root)).unwrap_err();
        e.delete_comment(reply.id).unwrap();

        let host = e.host();
        assert_eq!(
            host.test_event_names(),
            vec!["add-comment", "toggle-reaction", "edit-comment", "delete-comment"]
        );
        assert_eq!(host.remote(), e.store());
    }

    #[test]
    fn optimistic_updates_survive_an_offline_host() {
        let mut e = engine(EngineConfig::default(), Vec::new());
        e.host_mut().set_online(false);
        let c = e.add_comment("hello", None).unwrap();
        assert_eq!(ids(&e.threaded_comments()), vec![c.id]);
        assert!(e.host().remote().is_empty());

        e.host_mut().set_online(true);
        assert_eq!(e.host_mut().flush_rejected(), 1);
        assert_eq!(e.host().remote(), e.store());
    }

    fn ids(threads: &[Thread]) -> Vec<CommentId> {
        threads.iter().map(|t| t.comment.id).collect()
    }

    #[test]
    fn reply_depth_one_scenario() {
        let e = engine(
            EngineConfig {
                max_thread_depth: 1,
                ..EngineConfig::default()
            },
            vec![comment(1, None, 1), comment(2, Some(1), 2), comment(3, None, 3)],
        );
        let mut threads = e.threaded_comments();
        SortOrder::Oldest.sort(&mut threads);
        assert_eq!(
            ids(&threads),
            vec![CommentId(Uuid::from_u128(1)), CommentId(Uuid::from_u128(3))]
        );
        assert_eq!(ids(&threads[0].replies), vec![CommentId(Uuid::from_u128(2))]);
        assert!(threads[1].replies.is_empty());
    }

    #[test]
    fn cyclic_parents_are_shown_as_threads() {
        let e = engine(
            EngineConfig::default(),
            vec![comment(1, Some(2), 1), comment(2, Some(1), 2)],
        );
        let threads = e.all_threads();
        assert_eq!(threads.len(), 2);
        assert!(threads.iter().all(|t| t.replies.is_empty()));
    }

    #[test]
    fn sort_change_is_forwarded_and_resets_paging() {
        let comments = (0..25).map(|n| comment(n, None, n as i64)).collect();
        let mut e = engine(EngineConfig::default(), comments);
        assert!(e.load_more());
        assert_eq!(e.threaded_comments().len(), 20);
        e.set_sort_order(SortOrder::Oldest);
        assert_eq!(e.threaded_comments().len(), 10);
        assert_eq!(
            e.threaded_comments()[0].comment.id,
            CommentId(Uuid::from_u128(0))
        );
        assert_eq!(e.host().sort_changes(), &[SortOrder::Oldest]);
    }

    #[test]
    fn dump_round_trips_through_the_engine() {
        let mut e = engine(EngineConfig::default(), vec![comment(1, None, 1)]);
        e.add_comment("new", None).unwrap();
        let dump = CommentDump::from_store(e.current_user().clone(), e.store());
        let json = serde_json::to_string(&dump).unwrap();
        let back: CommentDump = serde_json::from_str(&json).unwrap();
        let reloaded = back.into_engine(EngineConfig::default(), ());
        assert_eq!(reloaded.store(), e.store());
        assert_eq!(reloaded.threaded_comments(), e.threaded_comments());
    }

    /// Runs random mutations and checks that the view stays consistent with
    /// the store, and the store with what the host persisted
    #[test]
    fn fuzz_mutation_sequences() {
        bolero::check!()
            .with_type::<Vec<(u8, u8)>>()
            .cloned()
            .for_each(|ops| {
                let config = EngineConfig {
                    max_thread_depth: 2,
                    page_size: None,
                    moderators: vec![user(1).id],
                    ..EngineConfig::default()
                };
                let others = vec![comment(2, None, 0), comment(3, Some(2), 1)];
                let mut e = engine(config, others);
                for (op, target) in ops {
                    let all = e.store().all();
                    let target = match all.is_empty() {
                        true => CommentId::stub(),
                        false => all[target as usize % all.len()].id,
                    };
                    let before = e.store().clone();
                    let res = match op % 8 {
                        0 => e.add_comment("root", None),
                        1 => e.add_comment("reply", Some(target)),
                        2 => e.edit_comment(target, "edited"),
                        3 => e.delete_comment(target),
                        4 => e.toggle_reaction(target, ReactionKind::like()),
                        5 => e.pin_comment(target),
                        6 => e.flag_comment(target),
                        _ => e.feature_comment(target),
                    };
                    if res.is_err() {
                        assert_eq!(*e.store(), before);
                    }
                }

                assert_eq!(e.host().remote(), e.store());
                let mut flagged = e
                    .host()
                    .events()
                    .iter()
                    .filter(|ev| ev.data.name() == "flag-comment")
                    .map(|ev| ev.comment_id())
                    .collect::<Vec<_>>();
                assert!(flagged.iter().all(|id| e.is_flagged(id)));
                let num_flags = flagged.len();
                flagged.sort();
                flagged.dedup();
                assert_eq!(flagged.len(), num_flags, "a comment is flagged at most once");
                let threads = e.threaded_comments();
                let shown = nodes(&threads);
                let live = shown.iter().filter(|t| !t.comment.is_deleted).count();
                assert_eq!(live, e.total_comments());
                for t in shown {
                    assert!(t.depth <= 2);
                    if t.comment.is_deleted {
                        assert!(t.iter().any(|d| !d.comment.is_deleted));
                    }
                }
            })
    }
}
