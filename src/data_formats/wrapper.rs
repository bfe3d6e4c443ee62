use serde::{Deserialize, Serialize};

use crate::models::{Article, ArticleSummary, Comment, Topic, User};

#[derive(Debug, Deserialize, Serialize)]
pub struct TopicsWrapper {
    pub topics: Vec<Topic>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ArticleWrapper {
    pub article: Article,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleArticlesWrapper {
    pub articles: Vec<ArticleSummary>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CommentWrapper {
    pub comment: Comment,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleCommentsWrapper {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UsersWrapper {
    pub users: Vec<User>,
}
