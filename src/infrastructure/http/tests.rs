use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

use super::{build_router, AppState, Repositories, ServerConfig};
use crate::application::ports::UserRepositoryPort;
use crate::application::{
    CacheSettings, QueryCache, RecommendationSettings, SessionStore, DEFAULT_SESSION_TTL,
};
use crate::domain::Identity;
use crate::infrastructure::adapters::LocalBlobStorage;
use crate::infrastructure::memory::InMemoryCacheStore;
use crate::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, DbPool, SqliteUserRepository,
};

const BOUNDARY: &str = "vibe-test-boundary";

struct TestApp {
    router: Router,
    sessions: Arc<SessionStore>,
    users: SqliteUserRepository,
    pool: DbPool,
    _blob_dir: TempDir,
}

impl TestApp {
    async fn new() -> Self {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let blob_dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(
            LocalBlobStorage::new(blob_dir.path(), "http://localhost:8080")
                .await
                .unwrap(),
        );
        let cache = Arc::new(QueryCache::new(
            InMemoryCacheStore::new().arc(),
            CacheSettings::default(),
        ));
        let sessions = Arc::new(SessionStore::new(cache.clone(), DEFAULT_SESSION_TTL));

        let state = AppState::new(
            Repositories::sqlite(pool.clone()),
            storage,
            cache,
            sessions.clone(),
            RecommendationSettings::default(),
        );
        let config = ServerConfig::default().with_blob_dir(blob_dir.path());

        Self {
            router: build_router(&config, Arc::new(state)),
            sessions,
            users: SqliteUserRepository::new(pool.clone()),
            pool,
            _blob_dir: blob_dir,
        }
    }

    async fn token(&self, identity: Identity) -> String {
        self.sessions.issue(&identity).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// 以 multipart `file` 字段上传
    async fn upload(
        &self,
        method: Method,
        uri: &str,
        token: &str,
        file_name: &str,
        data: &[u8],
    ) -> Value {
        let mut body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            b = BOUNDARY,
            f = file_name
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    }

    async fn seed_songs(&self, admin: &str, count: usize) -> Vec<u64> {
        let (_, body) = self
            .send(
                Method::POST,
                "/admin/addArtist",
                Some(admin),
                Some(json!({"artistName": "周杰伦", "gender": 0, "area": "中国台湾"})),
            )
            .await;
        assert_eq!(body["code"], 0, "{}", body);
        let artist_id = body["data"]["id"].as_u64().unwrap();

        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let (_, body) = self
                .send(
                    Method::POST,
                    "/admin/addSong",
                    Some(admin),
                    Some(json!({
                        "artistId": artist_id,
                        "songName": format!("song-{}", i),
                        "album": "叶惠美",
                        "style": "流行",
                        "releaseTime": "2003-07-31"
                    })),
                )
                .await;
            assert_eq!(body["code"], 0, "{}", body);
            ids.push(body["data"]["id"].as_u64().unwrap());
        }
        ids
    }
}

#[tokio::test]
async fn test_ping() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/api/ping", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_empty_catalog_is_not_found() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send(
            Method::POST,
            "/song/getAllSongs",
            None,
            Some(json!({"pageNum": 1, "pageSize": 10})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 1);
    assert_eq!(body["message"], "未找到相关数据");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_role_guards() {
    let app = TestApp::new().await;
    let user = app.token(Identity::user(5)).await;

    let page = json!({"pageNum": 1, "pageSize": 10});
    let (status, _) = app
        .send(Method::POST, "/favorite/getFavoriteSongs", None, Some(page.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::POST, "/admin/addPlaylist", Some(&user), Some(json!({"title": "x"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 无效令牌按匿名处理，公开接口照常访问
    let (status, body) = app
        .send(Method::GET, "/banner/getBannerList", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
}

#[tokio::test]
async fn test_like_status_follows_caller() {
    let app = TestApp::new().await;
    let admin = app.token(Identity::admin(1)).await;
    let user = app.token(Identity::user(9)).await;
    let songs = app.seed_songs(&admin, 3).await;

    let (_, body) = app
        .send(
            Method::POST,
            &format!("/favorite/collectSong?songId={}", songs[0]),
            Some(&user),
            None,
        )
        .await;
    assert_eq!(body["code"], 0, "{}", body);

    let (_, body) = app
        .send(
            Method::POST,
            &format!("/favorite/collectSong?songId={}", songs[0]),
            Some(&user),
            None,
        )
        .await;
    assert_eq!(body["code"], 1);

    let page = json!({"pageNum": 1, "pageSize": 10});
    let (_, anonymous) = app
        .send(Method::POST, "/song/getAllSongs", None, Some(page.clone()))
        .await;
    assert_eq!(anonymous["data"]["total"], 3);
    assert!(anonymous["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["likeStatus"] == 0));

    // 同一缓存值，按调用方重新标注
    let (_, personal) = app
        .send(Method::POST, "/song/getAllSongs", Some(&user), Some(page.clone()))
        .await;
    let liked: Vec<u64> = personal["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["likeStatus"] == 1)
        .map(|s| s["songId"].as_u64().unwrap())
        .collect();
    assert_eq!(liked, vec![songs[0]]);

    let (_, favorites) = app
        .send(Method::POST, "/favorite/getFavoriteSongs", Some(&user), Some(page))
        .await;
    assert_eq!(favorites["data"]["total"], 1);

    let (_, body) = app
        .send(
            Method::DELETE,
            &format!("/favorite/cancelCollectSong?songId={}", songs[0]),
            Some(&user),
            None,
        )
        .await;
    assert_eq!(body["code"], 0);

    let (_, detail) = app
        .send(
            Method::GET,
            &format!("/song/getSongDetail/{}", songs[0]),
            Some(&user),
            None,
        )
        .await;
    assert_eq!(detail["data"]["likeStatus"], 0);
}

#[tokio::test]
async fn test_recommendations_for_anonymous() {
    let app = TestApp::new().await;
    let admin = app.token(Identity::admin(1)).await;
    app.seed_songs(&admin, 12).await;

    let (_, body) = app
        .send(Method::GET, "/song/getRecommendedSongs", None, None)
        .await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert!(items.iter().all(|s| s["likeStatus"] == 0));
}

#[tokio::test]
async fn test_admin_writes_invalidate_reads() {
    let app = TestApp::new().await;
    let admin = app.token(Identity::admin(1)).await;
    let songs = app.seed_songs(&admin, 2).await;

    let page = json!({"pageNum": 1, "pageSize": 10});
    let (_, before) = app
        .send(Method::POST, "/song/getAllSongs", None, Some(page.clone()))
        .await;
    assert_eq!(before["data"]["total"], 2);

    let (_, body) = app
        .send(
            Method::DELETE,
            &format!("/admin/deleteSong/{}", songs[0]),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(body["code"], 0, "{}", body);

    let (_, after) = app
        .send(Method::POST, "/song/getAllSongs", None, Some(page))
        .await;
    assert_eq!(after["data"]["total"], 1);

    let (_, body) = app
        .send(
            Method::POST,
            "/admin/addArtist",
            Some(&admin),
            Some(json!({"artistName": "周杰伦", "gender": 0})),
        )
        .await;
    assert_eq!(body["code"], 1);
    assert_eq!(body["message"], "歌手已存在");
}

#[tokio::test]
async fn test_logout_and_delete_account_revoke_token() {
    let app = TestApp::new().await;
    let page = json!({"pageNum": 1, "pageSize": 10});

    let token = app.token(Identity::user(3)).await;
    let (_, body) = app.send(Method::POST, "/user/logout", Some(&token), None).await;
    assert_eq!(body["code"], 0);
    let (status, _) = app
        .send(Method::POST, "/favorite/getFavoriteSongs", Some(&token), Some(page.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user_id = app.users.create("alice", "").await.unwrap();
    let token = app.token(Identity::user(user_id)).await;
    let (_, body) = app
        .send(Method::DELETE, "/user/deleteAccount", Some(&token), None)
        .await;
    assert_eq!(body["code"], 0, "{}", body);
    assert!(app.users.find_by_id(user_id).await.unwrap().is_none());

    let (status, _) = app
        .send(Method::POST, "/favorite/getFavoriteSongs", Some(&token), Some(page))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_song_delete_clears_cached_favorites() {
    let app = TestApp::new().await;
    let admin = app.token(Identity::admin(1)).await;
    let user = app.token(Identity::user(9)).await;
    let songs = app.seed_songs(&admin, 1).await;

    app.send(
        Method::POST,
        &format!("/favorite/collectSong?songId={}", songs[0]),
        Some(&user),
        None,
    )
    .await;

    let page = json!({"pageNum": 1, "pageSize": 10});
    let (_, before) = app
        .send(Method::POST, "/favorite/getFavoriteSongs", Some(&user), Some(page.clone()))
        .await;
    assert_eq!(before["data"]["total"], 1);

    let (_, body) = app
        .send(
            Method::DELETE,
            &format!("/admin/deleteSong/{}", songs[0]),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(body["code"], 0, "{}", body);

    let (_, after) = app
        .send(Method::POST, "/favorite/getFavoriteSongs", Some(&user), Some(page))
        .await;
    assert_eq!(after["data"]["total"], 0, "{}", after);
}

#[tokio::test]
async fn test_artist_rename_reaches_cached_song_lists() {
    let app = TestApp::new().await;
    let admin = app.token(Identity::admin(1)).await;
    app.seed_songs(&admin, 2).await;

    let page = json!({"pageNum": 1, "pageSize": 10});
    let (_, before) = app
        .send(Method::POST, "/song/getAllSongs", None, Some(page.clone()))
        .await;
    assert_eq!(before["data"]["items"][0]["artistName"], "周杰伦");

    let artist_id: i64 = sqlx::query_scalar("SELECT id FROM artists LIMIT 1")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    let (_, body) = app
        .send(
            Method::PUT,
            "/admin/updateArtist",
            Some(&admin),
            Some(json!({"artistId": artist_id, "artistName": "Jay Chou", "gender": 0})),
        )
        .await;
    assert_eq!(body["code"], 0, "{}", body);

    let (_, after) = app
        .send(Method::POST, "/song/getAllSongs", None, Some(page))
        .await;
    assert!(after["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["artistName"] == "Jay Chou"));
}

#[tokio::test]
async fn test_huge_page_number_is_not_found() {
    let app = TestApp::new().await;
    let admin = app.token(Identity::admin(1)).await;
    app.seed_songs(&admin, 1).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/song/getAllSongs",
            None,
            Some(json!({"pageNum": 50_000_000u32, "pageSize": 100})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 1);
    assert_eq!(body["message"], "未找到相关数据");
}

#[tokio::test]
async fn test_song_delete_survives_foreign_blob_url() {
    let app = TestApp::new().await;
    let admin = app.token(Identity::admin(1)).await;
    let songs = app.seed_songs(&admin, 1).await;

    // 本地存储拒绝删除外部 URL
    sqlx::query("UPDATE songs SET cover_url = 'https://elsewhere.example/x.jpg' WHERE id = ?")
        .bind(songs[0] as i64)
        .execute(&app.pool)
        .await
        .unwrap();

    let (_, body) = app
        .send(
            Method::DELETE,
            &format!("/admin/deleteSong/{}", songs[0]),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(body["code"], 0, "{}", body);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_comments_on_song_detail() {
    let app = TestApp::new().await;
    let admin = app.token(Identity::admin(1)).await;
    let songs = app.seed_songs(&admin, 1).await;
    let detail_uri = format!("/song/getSongDetail/{}", songs[0]);

    let alice = app.users.create("alice", "").await.unwrap();
    let alice_token = app.token(Identity::user(alice)).await;
    let bob_token = app.token(Identity::user(alice + 1)).await;

    // 先把无评论的详情读进缓存
    let (_, detail) = app.send(Method::GET, &detail_uri, None, None).await;
    assert_eq!(detail["data"]["comments"], json!([]));

    let (_, body) = app
        .send(
            Method::POST,
            "/comment/addSongComment",
            Some(&alice_token),
            Some(json!({"songId": songs[0], "content": "好听"})),
        )
        .await;
    assert_eq!(body["code"], 0, "{}", body);
    let comment_id = body["data"]["id"].as_u64().unwrap();

    let (_, detail) = app.send(Method::GET, &detail_uri, None, None).await;
    let comments = detail["data"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["username"], "alice");
    assert_eq!(comments[0]["likeCount"], 0);

    let like_uri = format!("/comment/likeComment/{}", comment_id);
    let (_, body) = app.send(Method::PATCH, &like_uri, None, None).await;
    assert_eq!(body["code"], 0);
    let (_, detail) = app.send(Method::GET, &detail_uri, None, None).await;
    assert_eq!(detail["data"]["comments"][0]["likeCount"], 1);

    let cancel_uri = format!("/comment/cancelLikeComment/{}", comment_id);
    app.send(Method::PATCH, &cancel_uri, None, None).await;
    let (_, body) = app.send(Method::PATCH, &cancel_uri, None, None).await;
    assert_eq!(body["code"], 0);
    let (_, detail) = app.send(Method::GET, &detail_uri, None, None).await;
    assert_eq!(detail["data"]["comments"][0]["likeCount"], 0);

    let delete_uri = format!("/comment/deleteComment/{}", comment_id);
    let (status, _) = app
        .send(Method::DELETE, &delete_uri, Some(&bob_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = app
        .send(Method::DELETE, &delete_uri, Some(&alice_token), None)
        .await;
    assert_eq!(body["code"], 0, "{}", body);
    let (_, detail) = app.send(Method::GET, &detail_uri, None, None).await;
    assert_eq!(detail["data"]["comments"], json!([]));

    let (_, body) = app
        .send(
            Method::POST,
            "/comment/addPlaylistComment",
            Some(&alice_token),
            Some(json!({"playlistId": 404, "content": "?"})),
        )
        .await;
    assert_eq!(body["code"], 1);
}

#[tokio::test]
async fn test_user_profile_updates() {
    let app = TestApp::new().await;
    let admin = app.token(Identity::admin(1)).await;
    let songs = app.seed_songs(&admin, 1).await;

    let alice = app.users.create("alice", "").await.unwrap();
    app.users.create("bob_01", "").await.unwrap();
    let token = app.token(Identity::user(alice)).await;

    let (_, info) = app.send(Method::GET, "/user/getUserInfo", Some(&token), None).await;
    assert_eq!(info["data"]["username"], "alice");
    assert_eq!(info["data"]["userId"], alice);

    app.send(
        Method::POST,
        "/comment/addSongComment",
        Some(&token),
        Some(json!({"songId": songs[0], "content": "好听"})),
    )
    .await;
    let detail_uri = format!("/song/getSongDetail/{}", songs[0]);
    app.send(Method::GET, &detail_uri, None, None).await;

    let (_, body) = app
        .send(
            Method::PUT,
            "/user/updateUserInfo",
            Some(&token),
            Some(json!({"username": "bob_01", "email": "alice@example.com"})),
        )
        .await;
    assert_eq!(body["code"], 1);
    assert_eq!(body["message"], "用户名已存在");

    let (_, body) = app
        .send(
            Method::PUT,
            "/user/updateUserInfo",
            Some(&token),
            Some(json!({"username": "alice_2", "email": "not-an-email"})),
        )
        .await;
    assert_eq!(body["code"], 1);

    let (_, body) = app
        .send(
            Method::PUT,
            "/user/updateUserInfo",
            Some(&token),
            Some(json!({
                "username": "alice_2",
                "email": "alice@example.com",
                "phone": "13812345678",
                "introduction": "爱听民谣"
            })),
        )
        .await;
    assert_eq!(body["code"], 0, "{}", body);

    let (_, info) = app.send(Method::GET, "/user/getUserInfo", Some(&token), None).await;
    assert_eq!(info["data"]["username"], "alice_2");
    assert_eq!(info["data"]["phone"], "13812345678");

    // 评论里的用户名随资料更新
    let (_, detail) = app.send(Method::GET, &detail_uri, None, None).await;
    assert_eq!(detail["data"]["comments"][0]["username"], "alice_2");

    let body = app
        .upload(Method::PATCH, "/user/updateUserAvatar", &token, "me.png", b"png")
        .await;
    assert_eq!(body["code"], 0, "{}", body);
    let url = body["data"]["url"].as_str().unwrap().to_string();
    assert!(url.contains("/files/users/"));

    let (_, info) = app.send(Method::GET, "/user/getUserInfo", Some(&token), None).await;
    assert_eq!(info["data"]["userAvatar"], url);
}

#[tokio::test]
async fn test_banner_administration() {
    let app = TestApp::new().await;
    let admin = app.token(Identity::admin(1)).await;

    let mut ids = Vec::new();
    for name in ["a.png", "b.png"] {
        let body = app
            .upload(Method::POST, "/admin/addBanner", &admin, name, b"img")
            .await;
        assert_eq!(body["code"], 0, "{}", body);
        ids.push(body["data"]["id"].as_u64().unwrap());
    }

    let page = json!({"pageNum": 1, "pageSize": 10});
    let (_, all) = app
        .send(Method::POST, "/admin/getAllBanners", Some(&admin), Some(page.clone()))
        .await;
    assert_eq!(all["data"]["total"], 2);

    let (_, body) = app
        .send(
            Method::PATCH,
            &format!("/admin/updateBannerStatus/{}?status=1", ids[0]),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(body["code"], 0, "{}", body);

    let (_, public) = app.send(Method::GET, "/banner/getBannerList", None, None).await;
    let public = public["data"].as_array().unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0]["bannerId"], ids[1]);

    let (_, disabled) = app
        .send(
            Method::POST,
            "/admin/getAllBanners",
            Some(&admin),
            Some(json!({"pageNum": 1, "pageSize": 10, "status": 1})),
        )
        .await;
    assert_eq!(disabled["data"]["items"][0]["bannerId"], ids[0]);

    let body = app
        .upload(
            Method::PATCH,
            &format!("/admin/updateBanner/{}", ids[1]),
            &admin,
            "c.png",
            b"img2",
        )
        .await;
    assert_eq!(body["code"], 0, "{}", body);

    let (_, body) = app
        .send(Method::DELETE, "/admin/deleteBanners", Some(&admin), Some(json!(ids)))
        .await;
    assert_eq!(body["code"], 0, "{}", body);

    let (_, all) = app
        .send(Method::POST, "/admin/getAllBanners", Some(&admin), Some(page))
        .await;
    assert_eq!(all["code"], 1);
}

async fn count(app: &TestApp, admin: &str, uri: &str) -> Value {
    let (_, body) = app.send(Method::GET, uri, Some(admin), None).await;
    assert_eq!(body["code"], 0, "{}", body);
    body["data"].clone()
}

#[tokio::test]
async fn test_admin_counts() {
    let app = TestApp::new().await;
    let admin = app.token(Identity::admin(1)).await;
    app.seed_songs(&admin, 3).await;
    app.users.create("alice", "").await.unwrap();

    assert_eq!(count(&app, &admin, "/admin/getAllSongsCount").await, 3);
    assert_eq!(count(&app, &admin, "/admin/getAllSongsCount?style=%E6%B5%81").await, 3);
    assert_eq!(count(&app, &admin, "/admin/getAllSongsCount?style=rock").await, 0);
    assert_eq!(count(&app, &admin, "/admin/getAllArtistsCount?gender=0").await, 1);
    assert_eq!(count(&app, &admin, "/admin/getAllArtistsCount?gender=1").await, 0);
    assert_eq!(count(&app, &admin, "/admin/getAllPlaylistsCount").await, 0);
    assert_eq!(count(&app, &admin, "/admin/getAllUsersCount").await, 1);

    let user = app.token(Identity::user(5)).await;
    let (status, _) = app
        .send(Method::GET, "/admin/getAllUsersCount", Some(&user), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
