use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use super::*;
use crate::application::ports::{
    ArtistFilter, ArtistRepositoryPort, BannerRepositoryPort, CommentRepositoryPort,
    FavoriteRepositoryPort, NewArtist, NewPlaylist, NewSong, PlaylistFilter,
    PlaylistRepositoryPort, RepositoryError, SongFilter, SongRepositoryPort, StyleRepositoryPort,
    UserRepositoryPort,
};
use crate::application::{RecommendationSettings, Recommender, SongSource};
use crate::domain::catalog::{
    BannerStatus, CommentTarget, FavoriteKind, FavoriteTarget, Gender, LikeStatus, Pagination,
};
use crate::domain::{Identity, UserProfile};

async fn setup() -> DbPool {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

async fn add_artist(repo: &SqliteArtistRepository, name: &str) -> u64 {
    repo.create(&NewArtist {
        name: name.to_string(),
        gender: Gender::Female,
        birth: NaiveDate::from_ymd_opt(1990, 1, 2),
        area: "中国".to_string(),
        introduction: String::new(),
    })
    .await
    .unwrap()
}

async fn add_song(repo: &SqliteSongRepository, artist_id: u64, name: &str, style: &str) -> u64 {
    repo.create(&NewSong {
        artist_id,
        name: name.to_string(),
        album: "专辑".to_string(),
        lyric: String::new(),
        duration: String::new(),
        style: style.to_string(),
        release_time: NaiveDate::from_ymd_opt(2020, 5, 20),
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_song_page_filters_and_order() {
    let pool = setup().await;
    let artists = SqliteArtistRepository::new(pool.clone());
    let songs = SqliteSongRepository::new(pool.clone());

    let jay = add_artist(&artists, "周杰伦").await;
    let eason = add_artist(&artists, "陈奕迅").await;
    add_song(&songs, jay, "晴天", "流行").await;
    add_song(&songs, jay, "夜曲", "流行").await;
    add_song(&songs, eason, "十年", "流行").await;

    let page = Pagination::new(1, 10).unwrap();
    let all = songs.find_page(&SongFilter::default(), page).await.unwrap();
    assert_eq!(all.total, 3);
    let names: Vec<_> = all.items.iter().map(|s| s.song_name.as_str()).collect();
    assert_eq!(names, vec!["十年", "夜曲", "晴天"]);

    let filter = SongFilter {
        artist_name: Some("周".to_string()),
        ..Default::default()
    };
    let by_artist = songs.find_page(&filter, page).await.unwrap();
    assert_eq!(by_artist.total, 2);
    assert!(by_artist.items.iter().all(|s| s.artist_name == "周杰伦"));

    // 空白筛选值视为未设置
    let blank = SongFilter {
        song_name: Some("  ".to_string()),
        ..Default::default()
    };
    assert_eq!(songs.find_page(&blank, page).await.unwrap().total, 3);

    let second = songs
        .find_page(&SongFilter::default(), Pagination::new(2, 2).unwrap())
        .await
        .unwrap();
    assert_eq!(second.total, 3);
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].release_time, NaiveDate::from_ymd_opt(2020, 5, 20));
}

#[tokio::test]
async fn test_song_page_by_ids() {
    let pool = setup().await;
    let songs = SqliteSongRepository::new(pool.clone());
    let a = add_song(&songs, 1, "a", "流行").await;
    add_song(&songs, 1, "b", "流行").await;
    let c = add_song(&songs, 1, "c", "流行").await;

    let page = Pagination::new(1, 10).unwrap();
    let result = songs
        .find_page_by_ids(&[a, c], &SongFilter::default(), page)
        .await
        .unwrap();
    assert_eq!(result.total, 2);

    let empty = songs
        .find_page_by_ids(&[], &SongFilter::default(), page)
        .await
        .unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_song_random_and_styles_respect_exclusions() {
    let pool = setup().await;
    let songs = SqliteSongRepository::new(pool.clone());
    let mut rock = Vec::new();
    for i in 0..5 {
        rock.push(add_song(&songs, 1, &format!("rock-{}", i), "摇滚").await);
    }
    let pop = add_song(&songs, 1, "pop", "流行").await;

    let styled = songs
        .find_by_styles(&["摇滚".to_string()], &rock[..2], 10)
        .await
        .unwrap();
    assert_eq!(styled.len(), 3);
    assert!(styled.iter().all(|s| !rock[..2].contains(&s.song_id)));

    let random = songs.find_random(10, &[pop]).await.unwrap();
    assert_eq!(random.len(), 5);
    assert!(random.iter().all(|s| s.song_id != pop));

    assert!(songs.find_by_styles(&[], &[], 10).await.unwrap().is_empty());

    let labels = songs.find_styles_by_ids(&[pop, rock[0]]).await.unwrap();
    assert_eq!(labels.len(), 2);
    assert!(labels.contains(&"流行".to_string()));
}

#[tokio::test]
async fn test_delete_songs_cascades() {
    let pool = setup().await;
    let songs = SqliteSongRepository::new(pool.clone());
    let playlists = SqlitePlaylistRepository::new(pool.clone());
    let favorites = SqliteFavoriteRepository::new(pool.clone());

    let song = add_song(&songs, 1, "晴天", "流行").await;
    let playlist = playlists
        .create(&NewPlaylist {
            title: "华语".to_string(),
            introduction: String::new(),
            style: "流行".to_string(),
        })
        .await
        .unwrap();
    playlists.add_songs(playlist, &[song]).await.unwrap();
    favorites.add(7, FavoriteTarget::Song(song)).await.unwrap();
    let comments = SqliteCommentRepository::new(pool.clone());
    let comment = comments
        .create(7, CommentTarget::Song(song), "好听")
        .await
        .unwrap();

    assert_eq!(songs.delete_by_ids(&[song, 999]).await.unwrap(), 1);
    assert!(songs.find_by_id(song).await.unwrap().is_none());
    assert!(favorites.find_ids(7, FavoriteKind::Song).await.unwrap().is_empty());
    assert!(comments.find_by_id(comment).await.unwrap().is_none());

    let detail = playlists.find_detail(playlist).await.unwrap().unwrap();
    assert!(detail.songs.is_empty());
}

#[tokio::test]
async fn test_song_update_missing_is_not_found() {
    let pool = setup().await;
    let songs = SqliteSongRepository::new(pool.clone());
    let id = add_song(&songs, 1, "晴天", "流行").await;

    let mut record = songs.find_by_id(id).await.unwrap().unwrap();
    record.album = "叶惠美".to_string();
    songs.update(&record).await.unwrap();
    assert_eq!(songs.find_by_id(id).await.unwrap().unwrap().album, "叶惠美");

    record.id = 404;
    assert!(matches!(
        songs.update(&record).await,
        Err(RepositoryError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_style_genres() {
    let pool = setup().await;
    let styles = SqliteStyleRepository::new(pool.clone());

    let ids = styles
        .find_ids_by_names(&["流行".to_string(), "不存在".to_string(), "摇滚".to_string()])
        .await
        .unwrap();
    assert_eq!(ids.len(), 2);

    styles.replace_song_genres(1, &ids).await.unwrap();
    styles.replace_song_genres(1, &ids[..1]).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres WHERE song_id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    styles.delete_genres_by_song_ids(&[1]).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_playlist_filters() {
    let pool = setup().await;
    let playlists = SqlitePlaylistRepository::new(pool.clone());
    let favorites = SqliteFavoriteRepository::new(pool.clone());

    let mut ids = Vec::new();
    for (title, style) in [("华语金曲", "流行"), ("摇滚现场", "摇滚"), ("流行摇滚", "流行;摇滚")] {
        ids.push(
            playlists
                .create(&NewPlaylist {
                    title: title.to_string(),
                    introduction: String::new(),
                    style: style.to_string(),
                })
                .await
                .unwrap(),
        );
    }

    let page = Pagination::new(1, 10).unwrap();
    let exact = PlaylistFilter {
        style: Some("流行".to_string()),
        ..Default::default()
    };
    assert_eq!(playlists.find_page(&exact, page).await.unwrap().total, 1);

    for id in &ids {
        favorites.add(3, FavoriteTarget::Playlist(*id)).await.unwrap();
    }
    // 收藏列表对风格模糊匹配
    let fuzzy = playlists.find_favorite_page(3, &exact, page).await.unwrap();
    assert_eq!(fuzzy.total, 2);

    assert!(playlists.find_by_title("摇滚现场").await.unwrap().is_some());
    assert!(playlists.find_by_title("摇滚").await.unwrap().is_none());

    assert_eq!(playlists.delete_by_ids(&ids[..1]).await.unwrap(), 1);
    assert_eq!(
        favorites.find_ids(3, FavoriteKind::Playlist).await.unwrap(),
        ids[1..].to_vec()
    );
}

#[tokio::test]
async fn test_artist_page_and_detail() {
    let pool = setup().await;
    let artists = SqliteArtistRepository::new(pool.clone());
    let songs = SqliteSongRepository::new(pool.clone());

    let id = add_artist(&artists, "邓紫棋").await;
    add_song(&songs, id, "泡沫", "流行").await;
    assert!(artists.exists_by_name("邓紫棋").await.unwrap());
    assert!(!artists.exists_by_name("邓").await.unwrap());

    let filter = ArtistFilter {
        gender: Some(Gender::Female),
        ..Default::default()
    };
    let page = artists
        .find_page(&filter, Pagination::new(1, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(page.total, 1);

    let filter = ArtistFilter {
        gender: Some(Gender::Male),
        ..Default::default()
    };
    let page = artists
        .find_page(&filter, Pagination::new(1, 10).unwrap())
        .await
        .unwrap();
    assert!(page.is_empty());

    let detail = artists.find_detail(id).await.unwrap().unwrap();
    assert_eq!(detail.songs.len(), 1);
    assert_eq!(detail.songs[0].artist_name, "邓紫棋");
    assert_eq!(detail.birth, NaiveDate::from_ymd_opt(1990, 1, 2));

    artists.update_avatar(id, "http://localhost/files/avatars/a.png").await.unwrap();
    assert_eq!(
        artists.find_by_id(id).await.unwrap().unwrap().avatar,
        "http://localhost/files/avatars/a.png"
    );
    assert_eq!(artists.find_names().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_favorites_sorted_and_unique() {
    let pool = setup().await;
    let favorites = SqliteFavoriteRepository::new(pool.clone());

    for id in [9, 3, 5] {
        favorites.add(1, FavoriteTarget::Song(id)).await.unwrap();
    }
    favorites.add(1, FavoriteTarget::Playlist(4)).await.unwrap();

    assert_eq!(
        favorites.find_ids(1, FavoriteKind::Song).await.unwrap(),
        vec![3, 5, 9]
    );
    assert!(matches!(
        favorites.add(1, FavoriteTarget::Song(3)).await,
        Err(RepositoryError::Duplicate(_))
    ));

    assert!(favorites.remove(1, FavoriteTarget::Song(5)).await.unwrap());
    assert!(!favorites.remove(1, FavoriteTarget::Song(5)).await.unwrap());

    favorites.delete_by_user(1).await.unwrap();
    assert!(!favorites.exists(1, FavoriteTarget::Playlist(4)).await.unwrap());
}

#[tokio::test]
async fn test_users_and_banners() {
    let pool = setup().await;
    let users = SqliteUserRepository::new(pool.clone());
    let banners = SqliteBannerRepository::new(pool.clone());

    let id = users.create("alice", "").await.unwrap();
    assert!(matches!(
        users.create("alice", "").await,
        Err(RepositoryError::Duplicate(_))
    ));
    users.delete(id).await.unwrap();
    assert!(users.find_by_id(id).await.unwrap().is_none());
    assert!(matches!(users.delete(id).await, Err(RepositoryError::NotFound(_))));

    let first = banners.create("http://localhost/files/banners/1.png").await.unwrap();
    let second = banners.create("http://localhost/files/banners/2.png").await.unwrap();
    sqlx::query("UPDATE banners SET status = 1 WHERE id = ?")
        .bind(first as i64)
        .execute(&pool)
        .await
        .unwrap();

    let enabled = banners.find_enabled().await.unwrap();
    assert_eq!(enabled.len(), 1);
    assert_eq!(enabled[0].banner_id, second);
}

#[tokio::test]
async fn test_song_recommendation_over_sqlite() {
    let pool = setup().await;
    let songs = Arc::new(SqliteSongRepository::new(pool.clone()));
    let favorites = Arc::new(SqliteFavoriteRepository::new(pool.clone()));
    let styles = Arc::new(SqliteStyleRepository::new(pool.clone()));

    let mut pop = Vec::new();
    for i in 0..3 {
        pop.push(add_song(&songs, 1, &format!("pop-{}", i), "流行").await);
    }
    for i in 0..20 {
        add_song(&songs, 1, &format!("rock-{}", i), "摇滚").await;
    }
    for id in &pop {
        favorites.add(42, FavoriteTarget::Song(*id)).await.unwrap();
    }

    let recommender = Recommender::new(
        SongSource::new(songs, favorites, styles),
        RecommendationSettings::default(),
    );
    let items = recommender
        .recommend(Some(&Identity::user(42)))
        .await
        .unwrap();

    assert_eq!(items.len(), 10);
    let unique: HashSet<_> = items.iter().map(|s| s.song_id).collect();
    assert_eq!(unique.len(), 10);
    assert!(items.iter().all(|s| !pop.contains(&s.song_id)));
    assert!(items.iter().all(|s| s.like_status == LikeStatus::Default));

    let anonymous = recommender.recommend(None).await.unwrap();
    assert_eq!(anonymous.len(), 10);
    assert!(anonymous.iter().all(|s| s.like_status == LikeStatus::Default));
}

#[tokio::test]
async fn test_comments_join_author_and_clamp_likes() {
    let pool = setup().await;
    let users = SqliteUserRepository::new(pool.clone());
    let comments = SqliteCommentRepository::new(pool.clone());

    let alice = users.create("alice", "http://localhost/files/avatars/a.png").await.unwrap();
    let first = comments.create(alice, CommentTarget::Song(1), "第一").await.unwrap();
    let second = comments.create(alice, CommentTarget::Song(1), "第二").await.unwrap();
    comments.create(alice, CommentTarget::Playlist(1), "歌单").await.unwrap();

    let views = comments.find_by_target(CommentTarget::Song(1)).await.unwrap();
    let ids: Vec<_> = views.iter().map(|c| c.comment_id).collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(views[0].username, "alice");
    assert_eq!(views[0].user_avatar, "http://localhost/files/avatars/a.png");

    let record = comments.find_by_id(first).await.unwrap().unwrap();
    assert_eq!(record.user_id, alice);
    assert_eq!(record.target, CommentTarget::Song(1));

    comments.increment_likes(first).await.unwrap();
    assert!(comments.decrement_likes(first).await.unwrap());
    // 点赞数不会减到负数
    assert!(!comments.decrement_likes(first).await.unwrap());
    assert_eq!(comments.find_by_id(first).await.unwrap().unwrap().like_count, 0);
    assert!(matches!(
        comments.increment_likes(404).await,
        Err(RepositoryError::NotFound(_))
    ));

    comments.delete_by_user(alice).await.unwrap();
    assert!(comments.find_by_target(CommentTarget::Playlist(1)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_user_profile_updates() {
    let pool = setup().await;
    let users = SqliteUserRepository::new(pool.clone());

    let alice = users.create("alice", "").await.unwrap();
    let bob = users.create("bob_01", "").await.unwrap();

    let profile = UserProfile::new("alice_2", "alice@example.com", "13812345678", "hi").unwrap();
    users.update_profile(alice, &profile).await.unwrap();

    let record = users.find_by_id(alice).await.unwrap().unwrap();
    assert_eq!(record.username, "alice_2");
    assert_eq!(record.phone, "13812345678");
    assert_eq!(users.find_id_by_email("alice@example.com").await.unwrap(), Some(alice));
    assert_eq!(users.find_id_by_username("bob_01").await.unwrap(), Some(bob));
    assert_eq!(users.find_id_by_email("").await.unwrap(), None);

    let taken = UserProfile::new("bob_01", "x@example.com", "", "").unwrap();
    assert!(matches!(
        users.update_profile(alice, &taken).await,
        Err(RepositoryError::Duplicate(_))
    ));

    users.update_avatar(bob, "http://localhost/files/avatars/b.png").await.unwrap();
    assert_eq!(
        users.find_by_id(bob).await.unwrap().unwrap().avatar_url,
        "http://localhost/files/avatars/b.png"
    );
    assert_eq!(users.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_banner_admin_operations() {
    let pool = setup().await;
    let banners = SqliteBannerRepository::new(pool.clone());

    let mut ids = Vec::new();
    for i in 0..3 {
        ids.push(
            banners
                .create(&format!("http://localhost/files/banners/{}.png", i))
                .await
                .unwrap(),
        );
    }
    banners.update_status(ids[0], BannerStatus::Disabled).await.unwrap();
    banners
        .update_url(ids[1], "http://localhost/files/banners/new.png")
        .await
        .unwrap();

    let page = Pagination::new(1, 10).unwrap();
    let all = banners.find_page(None, page).await.unwrap();
    assert_eq!(all.total, 3);
    assert_eq!(all.items[0].banner_id, ids[2]);

    let disabled = banners
        .find_page(Some(BannerStatus::Disabled), page)
        .await
        .unwrap();
    assert_eq!(disabled.total, 1);
    assert_eq!(disabled.items[0].banner_id, ids[0]);

    let found = banners.find_by_ids(&[ids[1], 404]).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].banner_url, "http://localhost/files/banners/new.png");

    assert_eq!(banners.delete_by_ids(&ids[..2]).await.unwrap(), 2);
    assert!(matches!(
        banners.update_status(ids[0], BannerStatus::Enabled).await,
        Err(RepositoryError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_catalog_counts() {
    let pool = setup().await;
    let artists = SqliteArtistRepository::new(pool.clone());
    let songs = SqliteSongRepository::new(pool.clone());
    let playlists = SqlitePlaylistRepository::new(pool.clone());

    let artist = add_artist(&artists, "邓紫棋").await;
    add_song(&songs, artist, "泡沫", "流行").await;
    add_song(&songs, artist, "光年之外", "流行/电子").await;
    add_song(&songs, artist, "摇滚歌", "摇滚").await;
    for style in ["流行", "流行;摇滚"] {
        playlists
            .create(&NewPlaylist {
                title: style.to_string(),
                introduction: String::new(),
                style: style.to_string(),
            })
            .await
            .unwrap();
    }

    assert_eq!(songs.count_by_style(None).await.unwrap(), 3);
    assert_eq!(songs.count_by_style(Some("流行")).await.unwrap(), 2);
    assert_eq!(playlists.count_by_style(Some("流行")).await.unwrap(), 1);
    assert_eq!(playlists.count_by_style(Some(" ")).await.unwrap(), 2);
    assert_eq!(artists.count(Some(Gender::Female), Some("中国")).await.unwrap(), 1);
    assert_eq!(artists.count(Some(Gender::Male), None).await.unwrap(), 0);
    assert_eq!(artists.count(None, Some("中")).await.unwrap(), 0);
}
