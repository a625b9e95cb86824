use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::{Comment, Post, PostStatus};
use crate::storage::MemStorage;

const REACT_TYPESCRIPT_CONTENT: &str = r#"# Introduction

In the rapidly evolving world of web development, React and TypeScript have emerged as the gold standard for building modern, scalable applications.

## Why React and TypeScript?

The combination of React's component-based architecture and TypeScript's static typing provides developers with:

- Enhanced developer experience with better IDE support
- Improved code quality through static type checking
- Better maintainability and refactoring capabilities
- Reduced runtime errors and improved debugging

## Modern React Patterns

### 1. Custom Hooks for State Logic

Custom hooks allow you to extract component logic into reusable functions:

```javascript
function useToggle(initialValue = false) {
  const [value, setValue] = useState(initialValue);
  const toggle = useCallback(() => setValue(prev => !prev), []);
  return [value, toggle];
}
```

### 2. Compound Components

This pattern allows you to create flexible, reusable components that work together seamlessly.

## Performance Optimization

Performance is crucial for modern web applications. Here are key strategies:

- **Code Splitting:** Split your code into smaller chunks that load on demand
- **Memoization:** Use React.memo and useMemo to prevent unnecessary re-renders
- **Lazy Loading:** Load components only when they're needed
- **Bundle Analysis:** Regularly analyze your bundle size and optimize

## Conclusion

React and TypeScript continue to evolve, offering developers powerful tools for building modern web applications. By following these patterns and best practices, you'll be well-equipped to create scalable, maintainable applications that stand the test of time."#;

/// Fills an empty store with the demo posts and comments. Returns the number
/// of entities imported.
pub async fn load_sample_data(store: &MemStorage) -> usize {
    let posts = sample_posts();
    let comments = sample_comments();
    let imported = posts.len() + comments.len();

    for post in posts {
        store.import_post(post).await;
    }
    for comment in comments {
        store.import_comment(comment).await;
    }

    tracing::info!("loaded {} sample entities", imported);
    imported
}

fn sample_posts() -> Vec<Post> {
    vec![
        published_post(
            1,
            "Building Modern Web Applications with React and TypeScript",
            "Exploring the latest patterns and best practices for creating scalable, maintainable web applications in 2024.",
            REACT_TYPESCRIPT_CONTENT,
            "JavaScript",
            "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=400",
            day(2024, 3, 15),
            24,
        ),
        published_post(
            2,
            "Advanced JavaScript Patterns for Modern Development",
            "Dive deep into advanced JavaScript patterns that will make your code more maintainable and performant.",
            "# Advanced JavaScript Patterns\n\nThis post explores advanced patterns...",
            "JavaScript",
            "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=400",
            day(2024, 3, 10),
            12,
        ),
        published_post(
            3,
            "Design Systems: Creating Consistency at Scale",
            "Learn how to build and maintain design systems that scale across teams and products.",
            "# Design Systems\n\nCreating consistent design systems...",
            "Design",
            "https://images.unsplash.com/photo-1561070791-2526d30994b5?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=400",
            day(2024, 3, 8),
            18,
        ),
    ]
}

fn sample_comments() -> Vec<Comment> {
    vec![
        Comment {
            id: 1,
            post_id: Some(1),
            author: "John Doe".into(),
            content: "Great article! I've been using React and TypeScript for a while now, and these patterns are exactly what I needed to improve my code quality. The custom hooks example is particularly useful.".into(),
            created_at: at_hour(2024, 3, 15, 10),
        },
        Comment {
            id: 2,
            post_id: Some(1),
            author: "Sarah Miller".into(),
            content: "The compound components pattern is something I've been struggling with. Your explanation makes it much clearer. Do you have any recommendations for when to use this pattern vs. regular prop drilling?".into(),
            created_at: at_hour(2024, 3, 15, 8),
        },
        Comment {
            id: 3,
            post_id: Some(1),
            author: "Mike Kim".into(),
            content: "Thanks for sharing this! I'm just starting with TypeScript and React, and this gives me a good roadmap to follow. The performance optimization section is gold.".into(),
            created_at: at_hour(2024, 3, 15, 6),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn published_post(
    id: u64,
    title: &str,
    excerpt: &str,
    content: &str,
    category: &str,
    featured_image: &str,
    date: DateTime<Utc>,
    likes: u64,
) -> Post {
    Post {
        id,
        title: title.into(),
        excerpt: excerpt.into(),
        content: content.into(),
        category: category.into(),
        featured_image: Some(featured_image.into()),
        status: PostStatus::Published,
        publish_date: Some(date),
        likes,
        created_at: date,
        updated_at: date,
    }
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    at_hour(year, month, day, 0)
}

fn at_hour(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .unwrap_or_default();
    Utc.from_utc_datetime(&naive)
}
