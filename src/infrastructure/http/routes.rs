//! HTTP Routes
//!
//! API Endpoints:
//! - /song/*      公开，身份可选（决定收藏标记与推荐方式）
//! - /playlist/*  公开，身份可选
//! - /artist/*    公开
//! - /banner/*    公开
//! - /comment/*   点赞公开，发表/删除需普通用户
//! - /favorite/*  普通用户
//! - /user/*      普通用户
//! - /admin/*     管理员
//! - /api/ping    健康检查

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;

use super::handlers::{self, admin};
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/ping", get(handlers::ping))
        .nest("/song", song_routes())
        .nest("/playlist", playlist_routes())
        .nest("/artist", artist_routes())
        .nest("/banner", banner_routes())
        .nest("/comment", comment_routes())
        .nest("/favorite", favorite_routes())
        .nest("/user", user_routes())
        .nest("/admin", admin_routes())
}

fn song_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/getAllSongs", post(handlers::get_all_songs))
        .route("/getRecommendedSongs", get(handlers::get_recommended_songs))
        .route("/getSongDetail/:id", get(handlers::get_song_detail))
}

fn playlist_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/getAllPlaylists", post(handlers::get_all_playlists))
        .route(
            "/getRecommendedPlaylists",
            get(handlers::get_recommended_playlists),
        )
        .route("/getPlaylistDetail/:id", get(handlers::get_playlist_detail))
}

fn artist_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/getAllArtists", post(handlers::get_all_artists))
        .route("/getRandomArtists", get(handlers::get_random_artists))
        .route("/getArtistDetail/:id", get(handlers::get_artist_detail))
}

fn banner_routes() -> Router<Arc<AppState>> {
    Router::new().route("/getBannerList", get(handlers::get_banner_list))
}

fn comment_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/likeComment/:id", patch(handlers::like_comment))
        .route("/cancelLikeComment/:id", patch(handlers::cancel_like_comment))
        .route("/addSongComment", post(handlers::add_song_comment))
        .route("/addPlaylistComment", post(handlers::add_playlist_comment))
        .route("/deleteComment/:id", delete(handlers::delete_comment))
}

fn favorite_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/getFavoriteSongs", post(handlers::get_favorite_songs))
        .route("/getFavoritePlaylists", post(handlers::get_favorite_playlists))
        .route("/collectSong", post(handlers::collect_song))
        .route("/cancelCollectSong", delete(handlers::cancel_collect_song))
        .route("/collectPlaylist", post(handlers::collect_playlist))
        .route(
            "/cancelCollectPlaylist",
            delete(handlers::cancel_collect_playlist),
        )
}

fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/logout", post(handlers::logout))
        .route("/deleteAccount", delete(handlers::delete_account))
        .route("/getUserInfo", get(handlers::get_user_info))
        .route("/updateUserInfo", put(handlers::update_user_info))
        .route("/updateUserAvatar", patch(handlers::update_user_avatar))
}

fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Counts
        .route("/getAllUsersCount", get(admin::get_all_users_count))
        .route("/getAllArtistsCount", get(admin::get_all_artists_count))
        .route("/getAllSongsCount", get(admin::get_all_songs_count))
        .route("/getAllPlaylistsCount", get(admin::get_all_playlists_count))
        // Songs
        .route("/getAllSongsByArtist", post(admin::get_all_songs_by_artist))
        .route("/addSong", post(admin::add_song))
        .route("/updateSong", put(admin::update_song))
        .route("/updateSongCover/:id", patch(admin::update_song_cover))
        .route("/updateSongAudio/:id", patch(admin::update_song_audio))
        .route("/deleteSong/:id", delete(admin::delete_song))
        .route("/deleteSongs", delete(admin::delete_songs))
        // Artists
        .route("/getAllArtistNames", get(admin::get_all_artist_names))
        .route("/addArtist", post(admin::add_artist))
        .route("/updateArtist", put(admin::update_artist))
        .route("/updateArtistAvatar/:id", patch(admin::update_artist_avatar))
        .route("/deleteArtist/:id", delete(admin::delete_artist))
        .route("/deleteArtists", delete(admin::delete_artists))
        // Playlists
        .route("/getAllPlaylists", post(admin::get_all_playlists))
        .route("/addPlaylist", post(admin::add_playlist))
        .route("/updatePlaylist", put(admin::update_playlist))
        .route("/updatePlaylistCover/:id", patch(admin::update_playlist_cover))
        .route("/bindPlaylistSongs", post(admin::bind_playlist_songs))
        .route("/deletePlaylist/:id", delete(admin::delete_playlist))
        .route("/deletePlaylists", delete(admin::delete_playlists))
        // Banners
        .route("/getAllBanners", post(admin::get_all_banners))
        .route("/addBanner", post(admin::add_banner))
        .route("/updateBanner/:id", patch(admin::update_banner))
        .route("/updateBannerStatus/:id", patch(admin::update_banner_status))
        .route("/deleteBanner/:id", delete(admin::delete_banner))
        .route("/deleteBanners", delete(admin::delete_banners))
}
