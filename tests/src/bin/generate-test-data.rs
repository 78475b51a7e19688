use chrono::{Duration, Utc};
use pulse_client::{
    api::{Comment, CommentId, CommentReaction, CommentUser, ReactionKind, UserId, Uuid},
    CommentDump,
};
use rand::{seq::SliceRandom, Rng};

const NUM_USERS: usize = 8;
const NUM_COMMENTS: usize = 200;
const MAX_WORDS: usize = 60;

/// Odds that a comment replies to an earlier one rather than starting a thread
const REPLY_RATIO: f64 = 0.6;
const DELETED_RATIO: f64 = 0.05;
const EDITED_RATIO: f64 = 0.1;
const PINNED_RATIO: f64 = 0.02;

const REACTIONS: [&str; 4] = ["like", "like", "laugh", "heart"];

fn gen_user() -> CommentUser {
    CommentUser::new(UserId(Uuid::new_v4()), lipsum::lipsum_words(2))
}

fn main() {
    let mut rng = rand::thread_rng();
    let users = (0..NUM_USERS).map(|_| gen_user()).collect::<Vec<_>>();
    let start = Utc::now() - Duration::days(30);

    let mut comments: Vec<Comment> = Vec::with_capacity(NUM_COMMENTS);
    for i in 0..NUM_COMMENTS {
        let parent_id = match !comments.is_empty() && rng.gen_bool(REPLY_RATIO) {
            true => comments.choose(&mut rng).map(|c| c.id),
            false => None,
        };
        let user = users.choose(&mut rng).cloned().unwrap_or_else(gen_user);
        let date = start + Duration::minutes(i as i64 * 10 + rng.gen_range(0..10));
        let mut c = Comment::new(
            CommentId(Uuid::new_v4()),
            parent_id,
            user,
            lipsum::lipsum_words(rng.gen_range(1..MAX_WORDS)),
            date,
        );
        for u in &users {
            if rng.gen_bool(0.2) {
                let kind = REACTIONS.choose(&mut rng).copied().unwrap_or("like");
                c.reactions.push(CommentReaction {
                    kind: ReactionKind::new(kind),
                    user: u.clone(),
                });
            }
        }
        c.is_edited = rng.gen_bool(EDITED_RATIO);
        c.is_pinned = parent_id.is_none() && rng.gen_bool(PINNED_RATIO);
        if rng.gen_bool(DELETED_RATIO) {
            c.tombstone();
        }
        comments.push(c);
    }

    let dump = CommentDump {
        current_user: users[0].clone(),
        comments,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&dump).expect("serializing test data")
    );
}
